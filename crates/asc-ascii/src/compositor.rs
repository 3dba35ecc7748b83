use asc_core::charset::GlyphRamp;
use asc_core::color::ColorProfile;
use asc_core::config::RenderFlags;
use asc_core::frame::Bitmap;

use crate::braille::render_braille;
use crate::luminance::render_ascii;

/// Compositor orchestre les modes de conversion pixel → texte.
///
/// Holds the escape flavor; everything else comes from the flags of each call.
///
/// # Example
/// ```
/// use asc_ascii::compositor::Compositor;
/// use asc_core::color::ColorProfile;
/// let c = Compositor::new(ColorProfile::Ansi256);
/// assert_eq!(c.profile(), ColorProfile::Ansi256);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Compositor {
    profile: ColorProfile,
}

impl Compositor {
    /// Create a compositor emitting escapes for `profile`.
    #[must_use]
    pub const fn new(profile: ColorProfile) -> Self {
        Self { profile }
    }

    #[must_use]
    pub const fn profile(&self) -> ColorProfile {
        self.profile
    }

    /// Render `bitmap`, dispatching on `flags.braille`.
    ///
    /// # Example
    /// ```
    /// use asc_ascii::compositor::Compositor;
    /// use asc_core::config::RenderFlags;
    /// use asc_core::frame::Bitmap;
    ///
    /// let bmp = Bitmap::filled(2, 4, (0, 0, 0, 65535));
    /// let flags = RenderFlags { braille: true, ..RenderFlags::default() };
    /// assert_eq!(Compositor::default().render(&bmp, &flags), "\u{28FF}\n");
    /// ```
    #[must_use]
    pub fn render(&self, bitmap: &Bitmap, flags: &RenderFlags) -> String {
        let art = if flags.braille {
            render_braille(bitmap, flags.colored, self.profile)
        } else {
            let ramp = GlyphRamp::new(&flags.custom_map);
            render_ascii(bitmap, &ramp, flags.colored, self.profile)
        };
        log::debug!(
            "Rendu {}×{} ({}) : {} octets",
            bitmap.width,
            bitmap.height,
            if flags.braille { "braille" } else { "ascii" },
            art.len()
        );
        art
    }
}

/// Render with true-color escapes.
#[must_use]
pub fn render(bitmap: &Bitmap, flags: &RenderFlags) -> String {
    Compositor::new(ColorProfile::TrueColor).render(bitmap, flags)
}

/// Render with escapes downsampled to `profile`.
#[must_use]
pub fn render_with_profile(bitmap: &Bitmap, flags: &RenderFlags, profile: ColorProfile) -> String {
    Compositor::new(profile).render(bitmap, flags)
}

#[cfg(test)]
mod tests {
    use asc_core::charset::DEFAULT_RAMP;

    use super::*;

    fn gradient(width: u32, height: u32) -> Bitmap {
        let mut bmp = Bitmap::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let v = ((x + y * width) * 65535 / (width * height - 1)) as u16;
                bmp.set_pixel(x, y, (v, v / 2, 65535 - v, 65535));
            }
        }
        bmp
    }

    #[test]
    fn empty_custom_map_equals_default_ramp() {
        let bmp = gradient(16, 9);
        for colored in [false, true] {
            let empty = RenderFlags {
                custom_map: String::new(),
                colored,
                braille: false,
            };
            let explicit = RenderFlags {
                custom_map: DEFAULT_RAMP.to_string(),
                ..empty.clone()
            };
            assert_eq!(render(&bmp, &empty), render(&bmp, &explicit));
        }
    }

    #[test]
    fn custom_map_is_used() {
        let bmp = Bitmap::filled(3, 1, (65535, 65535, 65535, 65535));
        let flags = RenderFlags {
            custom_map: ".:X".into(),
            ..RenderFlags::default()
        };
        assert_eq!(render(&bmp, &flags), "XXX\n");
    }

    #[test]
    fn braille_ignores_custom_map() {
        let bmp = Bitmap::filled(2, 4, (0, 0, 0, 65535));
        let flags = RenderFlags {
            custom_map: "ab".into(),
            braille: true,
            colored: false,
        };
        assert_eq!(render(&bmp, &flags), "\u{28FF}\n");
    }

    #[test]
    fn no_color_profile_drops_escapes() {
        let bmp = gradient(8, 4);
        let colored = RenderFlags {
            colored: true,
            ..RenderFlags::default()
        };
        let plain = RenderFlags::default();
        assert_eq!(
            render_with_profile(&bmp, &colored, ColorProfile::NoColor),
            render(&bmp, &plain)
        );
    }

    #[test]
    fn every_row_is_newline_terminated() {
        let bmp = gradient(7, 5);
        let art = render(&bmp, &RenderFlags::default());
        assert!(art.ends_with('\n'));
        assert_eq!(art.matches('\n').count(), 5);
        assert!(art.lines().all(|l| l.chars().count() == 7));
    }
}
