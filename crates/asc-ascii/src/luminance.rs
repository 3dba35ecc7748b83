use asc_core::charset::GlyphRamp;
use asc_core::color::{ColorProfile, to_rgb8};
use asc_core::frame::{Bitmap, Rgba16};
use rayon::prelude::*;

use crate::color_map::push_colored;

/// Luminance 8 bits d'un pixel 16 bits : `floor((0.299 R + 0.587 G + 0.114 B) / 256)`.
///
/// Exact integer form of the BT.601 weights, so gray pixels map to `v / 256`.
///
/// # Example
/// ```
/// use asc_ascii::luminance::luminance;
/// assert_eq!(luminance((65535, 65535, 65535, 65535)), 255);
/// assert_eq!(luminance((32896, 32896, 32896, 65535)), 128);
/// assert_eq!(luminance((65535, 0, 0, 65535)), 76);
/// ```
#[inline(always)]
#[must_use]
pub fn luminance(px: Rgba16) -> u8 {
    let (r, g, b, _) = px;
    ((u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114) / 256_000) as u8
}

/// Render a bitmap pixel-by-pixel: one glyph per pixel, one line per row.
///
/// # Example
/// ```
/// use asc_core::charset::GlyphRamp;
/// use asc_core::color::ColorProfile;
/// use asc_core::frame::Bitmap;
/// use asc_ascii::luminance::render_ascii;
///
/// let bmp = Bitmap::filled(3, 2, (65535, 65535, 65535, 65535));
/// let art = render_ascii(&bmp, &GlyphRamp::new(" #"), false, ColorProfile::TrueColor);
/// assert_eq!(art, "###\n###\n");
/// ```
#[must_use]
pub fn render_ascii(
    bitmap: &Bitmap,
    ramp: &GlyphRamp,
    colored: bool,
    profile: ColorProfile,
) -> String {
    let rows: Vec<String> = (0..bitmap.height)
        .into_par_iter()
        .map(|y| {
            let mut line = String::with_capacity(bitmap.width as usize + 1);
            for x in 0..bitmap.width {
                let px = bitmap.pixel(x, y);
                let ch = ramp.map(luminance(px));
                if colored {
                    push_colored(&mut line, ch, to_rgb8(px), profile);
                } else {
                    line.push(ch);
                }
            }
            line.push('\n');
            line
        })
        .collect();
    rows.concat()
}
