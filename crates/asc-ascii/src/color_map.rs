use std::fmt::Write;

use asc_core::color::{ColorProfile, rgb_to_ansi16, rgb_to_ansi256};
use crossterm::Command;
use crossterm::style::{Color, ResetColor, SetForegroundColor};

/// Append `ch` to `out`, wrapped in a foreground escape for `profile`.
///
/// Every colored glyph is followed by a reset. `NoColor` appends the bare glyph.
///
/// # Example
/// ```
/// use asc_ascii::color_map::push_colored;
/// use asc_core::color::ColorProfile;
/// let mut s = String::new();
/// push_colored(&mut s, '@', (255, 0, 10), ColorProfile::TrueColor);
/// assert_eq!(s, "\x1b[38;2;255;0;10m@\x1b[0m");
/// ```
pub fn push_colored(out: &mut String, ch: char, rgb: (u8, u8, u8), profile: ColorProfile) {
    let (r, g, b) = rgb;
    // Écrire dans une String ne peut pas échouer.
    let _ = match profile {
        ColorProfile::NoColor => Ok(()),
        ColorProfile::TrueColor => SetForegroundColor(Color::Rgb { r, g, b }).write_ansi(out),
        ColorProfile::Ansi256 => {
            SetForegroundColor(Color::AnsiValue(rgb_to_ansi256(r, g, b))).write_ansi(out)
        }
        ColorProfile::Ansi16 => {
            let idx = rgb_to_ansi16(r, g, b);
            let sgr = if idx < 8 { 30 + idx } else { 90 + idx - 8 };
            write!(out, "\x1b[{sgr}m")
        }
    };
    out.push(ch);
    if profile != ColorProfile::NoColor {
        let _ = ResetColor.write_ansi(out);
    }
}
