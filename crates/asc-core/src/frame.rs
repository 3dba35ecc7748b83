use crate::error::CoreError;

/// Image décodée, 16 bits par canal, RGBA row-major.
///
/// Les canaux couleur sont pré-multipliés par l'alpha : un pixel
/// transparent est noir, quelle que soit sa couleur d'origine.
///
/// # Example
/// ```
/// use asc_core::frame::Bitmap;
/// let bmp = Bitmap::new(10, 10);
/// assert_eq!(bmp.data.len(), 400);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    /// Pixels RGBA, row-major, 4 canaux `u16` par pixel.
    pub data: Vec<u16>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Un pixel 16 bits : (r, g, b, a), chaque canal dans [0, 65535].
pub type Rgba16 = (u16, u16, u16, u16);

impl Bitmap {
    /// Crée un bitmap noir transparent aux dimensions données.
    ///
    /// # Example
    /// ```
    /// use asc_core::frame::Bitmap;
    /// let bmp = Bitmap::new(100, 50);
    /// assert_eq!(bmp.width, 100);
    /// assert_eq!(bmp.height, 50);
    /// ```
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u16; width as usize * height as usize * 4],
            width,
            height,
        }
    }

    /// Wrap an existing RGBA16 buffer.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] if `data` does not hold
    /// exactly `width * height * 4` channels.
    ///
    /// # Example
    /// ```
    /// use asc_core::frame::Bitmap;
    /// let bmp = Bitmap::from_raw(1, 1, vec![1, 2, 3, 4]).unwrap();
    /// assert_eq!(bmp.pixel(0, 0), (1, 2, 3, 4));
    /// assert!(Bitmap::from_raw(2, 2, vec![0; 4]).is_err());
    /// ```
    pub fn from_raw(width: u32, height: u32, data: Vec<u16>) -> Result<Self, CoreError> {
        if data.len() != width as usize * height as usize * 4 {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Build a bitmap from straight (non-premultiplied) 8-bit RGBA bytes.
    ///
    /// Each channel is widened with `v * 257` then premultiplied by alpha.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] on a size mismatch.
    ///
    /// # Example
    /// ```
    /// use asc_core::frame::Bitmap;
    /// let bmp = Bitmap::from_rgba8(1, 1, &[255, 128, 0, 255]).unwrap();
    /// assert_eq!(bmp.pixel(0, 0), (65535, 32896, 0, 65535));
    /// ```
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Result<Self, CoreError> {
        let data = bytes.iter().map(|&v| u16::from(v) * 257).collect();
        Self::from_straight_rgba16(width, height, data)
    }

    /// Build a bitmap from straight 16-bit RGBA, premultiplying color by alpha.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] on a size mismatch.
    pub fn from_straight_rgba16(
        width: u32,
        height: u32,
        mut data: Vec<u16>,
    ) -> Result<Self, CoreError> {
        for px in data.chunks_exact_mut(4) {
            let a = u32::from(px[3]);
            if a == 0xFFFF {
                continue;
            }
            for c in &mut px[..3] {
                *c = (u32::from(*c) * a / 0xFFFF) as u16;
            }
        }
        Self::from_raw(width, height, data)
    }

    /// Accès au pixel (x, y).
    ///
    /// # Example
    /// ```
    /// use asc_core::frame::Bitmap;
    /// let bmp = Bitmap::new(4, 4);
    /// assert_eq!(bmp.pixel(3, 3), (0, 0, 0, 0));
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba16 {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        match self.data.get(idx..idx + 4) {
            Some(px) => (px[0], px[1], px[2], px[3]),
            None => (0, 0, 0, 0),
        }
    }

    /// Write pixel (x, y). Out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, px: Rgba16) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        self.data[idx..idx + 4].copy_from_slice(&[px.0, px.1, px.2, px.3]);
    }

    /// Bitmap uniforme, pratique pour les tests et les benchs.
    ///
    /// # Example
    /// ```
    /// use asc_core::frame::Bitmap;
    /// let bmp = Bitmap::filled(2, 3, (10, 20, 30, 65535));
    /// assert_eq!(bmp.pixel(1, 2), (10, 20, 30, 65535));
    /// ```
    #[must_use]
    pub fn filled(width: u32, height: u32, px: Rgba16) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for _ in 0..(width as usize * height as usize) {
            data.extend_from_slice(&[px.0, px.1, px.2, px.3]);
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// `true` if the bitmap has no pixels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Zone d'affichage du terminal, en cellules de caractères.
///
/// # Example
/// ```
/// use asc_core::frame::Viewport;
/// let vp = Viewport::new(80, 24);
/// assert_eq!((vp.width, vp.height), (80, 24));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    /// Colonnes.
    pub width: u32,
    /// Lignes.
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn premultiply_halves_color_at_half_alpha() {
        let bmp = Bitmap::from_straight_rgba16(1, 1, vec![65535, 65535, 0, 32768]).unwrap();
        let (r, g, b, a) = bmp.pixel(0, 0);
        assert_eq!(a, 32768);
        assert_eq!(r, 32768);
        assert_eq!(g, 32768);
        assert_eq!(b, 0);
    }

    #[test]
    fn transparent_pixel_is_black() {
        let bmp = Bitmap::from_rgba8(1, 1, &[200, 100, 50, 0]).unwrap();
        assert_eq!(bmp.pixel(0, 0), (0, 0, 0, 0));
    }

    #[test]
    fn set_pixel_ignores_out_of_bounds() {
        let mut bmp = Bitmap::new(2, 2);
        bmp.set_pixel(5, 5, (1, 1, 1, 1));
        bmp.set_pixel(1, 0, (7, 8, 9, 10));
        assert_eq!(bmp.pixel(1, 0), (7, 8, 9, 10));
        assert!(bmp.data.iter().filter(|&&c| c != 0).count() == 4);
    }
}
