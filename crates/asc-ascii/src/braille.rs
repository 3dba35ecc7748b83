use asc_core::color::{ColorProfile, to_rgb8};
use asc_core::frame::Bitmap;
use rayon::prelude::*;

use crate::color_map::push_colored;
use crate::luminance::luminance;

/// Braille base codepoint (U+2800).
const BRAILLE_BASE: u32 = 0x2800;

/// Un pixel plus sombre que ce seuil allume son point.
pub const DARK_THRESHOLD: u8 = 128;

/// Sub-pixel offsets (dx, dy) in bit order: offset `i` drives bit `i`.
///
/// ```text
///  0 1
///  2 3
///  4 5
///  6 7
/// ```
pub const DOT_OFFSETS: [(u32, u32); 8] = [
    (0, 0),
    (1, 0),
    (0, 1),
    (1, 1),
    (0, 2),
    (1, 2),
    (0, 3),
    (1, 3),
];

/// Map an 8-bit dot mask to its Braille character (`U+2800 | bits`).
///
/// # Example
/// ```
/// use asc_ascii::braille::encode_braille;
/// assert_eq!(encode_braille(0x00), '\u{2800}'); // empty
/// assert_eq!(encode_braille(0xFF), '\u{28FF}'); // full
/// ```
#[inline(always)]
#[must_use]
pub const fn encode_braille(bits: u8) -> char {
    match char::from_u32(BRAILLE_BASE | bits as u32) {
        Some(c) => c,
        None => ' ',
    }
}

/// Dot mask of the 2×4 block whose top-left pixel is (x, y).
///
/// Sub-pixels outside the bitmap stay off.
///
/// # Example
/// ```
/// use asc_core::frame::Bitmap;
/// use asc_ascii::braille::block_bits;
/// let black = Bitmap::filled(2, 4, (0, 0, 0, 65535));
/// assert_eq!(block_bits(&black, 0, 0), 0xFF);
/// let partial = Bitmap::filled(1, 1, (0, 0, 0, 65535));
/// assert_eq!(block_bits(&partial, 0, 0), 0x01);
/// ```
#[must_use]
pub fn block_bits(bitmap: &Bitmap, x: u32, y: u32) -> u8 {
    let mut bits = 0u8;
    for (i, &(dx, dy)) in DOT_OFFSETS.iter().enumerate() {
        let (px, py) = (x + dx, y + dy);
        if px < bitmap.width && py < bitmap.height && luminance(bitmap.pixel(px, py)) < DARK_THRESHOLD
        {
            bits |= 1 << i;
        }
    }
    bits
}

/// Render a bitmap as Braille, one character per 2×4 block.
///
/// Color comes from the block's top-left pixel only.
///
/// # Example
/// ```
/// use asc_core::color::ColorProfile;
/// use asc_core::frame::Bitmap;
/// use asc_ascii::braille::render_braille;
/// let bmp = Bitmap::filled(4, 4, (0, 0, 0, 65535));
/// assert_eq!(render_braille(&bmp, false, ColorProfile::TrueColor), "⣿⣿\n");
/// ```
#[must_use]
pub fn render_braille(bitmap: &Bitmap, colored: bool, profile: ColorProfile) -> String {
    let rows: Vec<String> = (0..bitmap.height)
        .into_par_iter()
        .step_by(4)
        .map(|y| {
            let mut line = String::with_capacity(bitmap.width as usize * 3 / 2 + 1);
            for x in (0..bitmap.width).step_by(2) {
                let ch = encode_braille(block_bits(bitmap, x, y));
                if colored {
                    push_colored(&mut line, ch, to_rgb8(bitmap.pixel(x, y)), profile);
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

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: (u16, u16, u16, u16) = (0, 0, 0, 65535);
    const WHITE: (u16, u16, u16, u16) = (65535, 65535, 65535, 65535);

    #[test]
    fn braille_empty_is_blank() {
        assert_eq!(encode_braille(0), '\u{2800}');
    }

    #[test]
    fn dark_block_is_solid() {
        let bmp = Bitmap::filled(2, 4, BLACK);
        assert_eq!(render_braille(&bmp, false, ColorProfile::TrueColor), "\u{28FF}\n");
    }

    #[test]
    fn bright_block_is_blank() {
        let bmp = Bitmap::filled(2, 4, WHITE);
        assert_eq!(render_braille(&bmp, false, ColorProfile::TrueColor), "\u{2800}\n");
    }

    #[test]
    fn bits_follow_row_major_offsets() {
        let mut bmp = Bitmap::filled(2, 4, WHITE);
        bmp.set_pixel(1, 0, BLACK);
        bmp.set_pixel(0, 3, BLACK);
        assert_eq!(block_bits(&bmp, 0, 0), (1 << 1) | (1 << 6));
    }

    #[test]
    fn threshold_is_strict() {
        let at = 128 * 257;
        let below = 127 * 257;
        let bmp = Bitmap::filled(1, 1, (at, at, at, 65535));
        assert_eq!(block_bits(&bmp, 0, 0), 0);
        let bmp = Bitmap::filled(1, 1, (below, below, below, 65535));
        assert_eq!(block_bits(&bmp, 0, 0), 1);
    }

    #[test]
    fn output_grid_rounds_up() {
        let bmp = Bitmap::filled(5, 9, WHITE);
        let art = render_braille(&bmp, false, ColorProfile::TrueColor);
        let lines: Vec<&str> = art.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l.chars().count() == 3));
    }

    #[test]
    fn color_from_top_left_only() {
        let mut bmp = Bitmap::filled(2, 4, (0, 0, 65535, 65535));
        bmp.set_pixel(0, 0, (65535, 0, 0, 65535));
        let art = render_braille(&bmp, true, ColorProfile::TrueColor);
        assert_eq!(art, "\x1b[38;2;255;0;0m\u{28FF}\x1b[0m\n");
    }
}
