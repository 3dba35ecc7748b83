use anyhow::{Context, Result};
use asc_core::error::CoreError;
use asc_core::frame::{Bitmap, Viewport};
use fast_image_resize::images::Image;
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer as FirResizer};

/// Ratio hauteur/largeur d'une cellule de terminal.
pub const CHAR_ASPECT_RATIO: f64 = 2.0;

/// Fit a `source_w × source_h` image into a `max_w × max_h` cell viewport,
/// correcting for the 2:1 cell aspect ratio.
///
/// # Errors
/// Returns [`CoreError::Geometry`] if any input dimension is zero.
///
/// # Example
/// ```
/// use asc_source::resize::fit_dimensions;
/// assert_eq!(fit_dimensions(100, 50, 80, 24).unwrap(), (80, 20));
/// ```
pub fn fit_dimensions(
    source_w: u32,
    source_h: u32,
    max_w: u32,
    max_h: u32,
) -> Result<(u32, u32), CoreError> {
    fit_dimensions_with_aspect(source_w, source_h, max_w, max_h, CHAR_ASPECT_RATIO)
}

/// [`fit_dimensions`] with an explicit cell aspect ratio (height / width).
///
/// Truncated results are clamped to at least 1.
///
/// # Errors
/// Returns [`CoreError::Geometry`] if any input dimension is zero.
///
/// # Example
/// ```
/// use asc_source::resize::fit_dimensions_with_aspect;
/// // Square cells: a square image fills the shorter side.
/// assert_eq!(fit_dimensions_with_aspect(10, 10, 40, 20, 1.0).unwrap(), (20, 20));
/// ```
pub fn fit_dimensions_with_aspect(
    source_w: u32,
    source_h: u32,
    max_w: u32,
    max_h: u32,
    char_aspect: f64,
) -> Result<(u32, u32), CoreError> {
    if source_w == 0 || source_h == 0 || max_w == 0 || max_h == 0 {
        return Err(CoreError::Geometry {
            source_width: source_w,
            source_height: source_h,
            max_width: max_w,
            max_height: max_h,
        });
    }

    let (sw, sh) = (f64::from(source_w), f64::from(source_h));
    let (mw, mh) = (f64::from(max_w), f64::from(max_h));
    let term_aspect = mw / (mh * char_aspect);

    let (w, h) = if sw / sh > term_aspect {
        (mw, mw / sw * sh / char_aspect)
    } else {
        (mh / sh * sw * char_aspect, mh)
    };

    Ok(((w as u32).max(1), (h as u32).max(1)))
}

/// Resampler Lanczos3 réutilisable wrappant fast_image_resize.
///
/// Works on premultiplied `U16x4` buffers, so alpha handling is disabled.
///
/// # Example
/// ```
/// use asc_source::resize::Resampler;
/// let r = Resampler::new();
/// ```
pub struct Resampler {
    inner: FirResizer,
    options: ResizeOptions,
}

impl Resampler {
    /// Create a new resampler.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: FirResizer::new(),
            options: ResizeOptions::new()
                .resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3))
                .use_alpha(false),
        }
    }

    /// Resample `src` to `width × height`.
    ///
    /// # Errors
    /// Returns an error if a dimension is zero or the resize fails.
    ///
    /// # Example
    /// ```
    /// use asc_source::resize::Resampler;
    /// use asc_core::frame::Bitmap;
    /// let mut r = Resampler::new();
    /// let src = Bitmap::new(100, 100);
    /// let dst = r.resample(&src, 50, 25).unwrap();
    /// assert_eq!((dst.width, dst.height), (50, 25));
    /// ```
    pub fn resample(&mut self, src: &Bitmap, width: u32, height: u32) -> Result<Bitmap> {
        if src.width == width && src.height == height {
            return Ok(src.clone());
        }

        let bytes: Vec<u8> = src.data.iter().flat_map(|c| c.to_ne_bytes()).collect();
        let src_image = Image::from_vec_u8(src.width, src.height, bytes, PixelType::U16x4)
            .context("Dimensions source invalides")?;
        let mut dst_image = Image::new(width, height, PixelType::U16x4);

        self.inner
            .resize(&src_image, &mut dst_image, Some(&self.options))
            .context("Échec du redimensionnement")?;

        let data = dst_image
            .buffer()
            .chunks_exact(2)
            .map(|b| u16::from_ne_bytes([b[0], b[1]]))
            .collect();
        Ok(Bitmap::from_raw(width, height, data)?)
    }

    /// Fit `src` into `viewport` and resample it in one step.
    ///
    /// # Errors
    /// Returns an error on degenerate geometry or resize failure.
    pub fn resize_to_fit(
        &mut self,
        src: &Bitmap,
        viewport: Viewport,
        char_aspect: f64,
    ) -> Result<Bitmap> {
        let (w, h) = fit_dimensions_with_aspect(
            src.width,
            src.height,
            viewport.width,
            viewport.height,
            char_aspect,
        )?;
        log::debug!(
            "Redimensionnement {}×{} → {w}×{h} (viewport {}×{})",
            src.width,
            src.height,
            viewport.width,
            viewport.height
        );
        self.resample(src, w, h)
    }
}

impl Default for Resampler {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience for one-shot usage.
///
/// # Errors
/// Returns an error on degenerate geometry or resize failure.
///
/// # Example
/// ```
/// use asc_source::resize::resize_to_fit;
/// use asc_core::frame::{Bitmap, Viewport};
/// let src = Bitmap::new(100, 50);
/// let dst = resize_to_fit(&src, Viewport::new(80, 24)).unwrap();
/// assert_eq!((dst.width, dst.height), (80, 20));
/// ```
pub fn resize_to_fit(src: &Bitmap, viewport: Viewport) -> Result<Bitmap> {
    Resampler::new().resize_to_fit(src, viewport, CHAR_ASPECT_RATIO)
}
