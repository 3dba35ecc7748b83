use serde::{Deserialize, Serialize};

/// Capacité couleur du terminal, du plus riche au plus pauvre.
///
/// # Example
/// ```
/// use asc_core::color::ColorProfile;
/// assert_eq!(ColorProfile::default(), ColorProfile::TrueColor);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum ColorProfile {
    /// 24-bit RGB escapes.
    #[default]
    TrueColor,
    /// xterm 256-color palette.
    Ansi256,
    /// 16 standard colors.
    Ansi16,
    /// No escapes at all.
    NoColor,
}

impl ColorProfile {
    /// Detect the profile from the process environment.
    #[must_use]
    pub fn detect() -> Self {
        let colorterm = std::env::var("COLORTERM").ok();
        let term = std::env::var("TERM").ok();
        Self::from_env_values(colorterm.as_deref(), term.as_deref())
    }

    /// Pure detection logic over `COLORTERM` / `TERM` values.
    ///
    /// # Example
    /// ```
    /// use asc_core::color::ColorProfile;
    /// assert_eq!(ColorProfile::from_env_values(Some("truecolor"), None), ColorProfile::TrueColor);
    /// assert_eq!(ColorProfile::from_env_values(None, Some("xterm-256color")), ColorProfile::Ansi256);
    /// assert_eq!(ColorProfile::from_env_values(None, Some("dumb")), ColorProfile::NoColor);
    /// ```
    #[must_use]
    pub fn from_env_values(colorterm: Option<&str>, term: Option<&str>) -> Self {
        if let Some(ct) = colorterm {
            let ct = ct.to_ascii_lowercase();
            if ct == "truecolor" || ct == "24bit" {
                return Self::TrueColor;
            }
        }
        match term {
            None => Self::TrueColor,
            Some("dumb") => Self::NoColor,
            Some(t) if t.contains("256color") => Self::Ansi256,
            Some(_) => Self::Ansi16,
        }
    }
}

/// Niveaux du cube 6×6×6 xterm.
const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

/// Palette xterm par défaut des 16 couleurs standard.
pub const ANSI16_PALETTE: [(u8, u8, u8); 16] = [
    (0, 0, 0),
    (205, 0, 0),
    (0, 205, 0),
    (205, 205, 0),
    (0, 0, 238),
    (205, 0, 205),
    (0, 205, 205),
    (229, 229, 229),
    (127, 127, 127),
    (255, 0, 0),
    (0, 255, 0),
    (255, 255, 0),
    (92, 92, 255),
    (255, 0, 255),
    (0, 255, 255),
    (255, 255, 255),
];

#[inline]
fn dist_sq(a: (u8, u8, u8), b: (u8, u8, u8)) -> u32 {
    let d = |x: u8, y: u8| {
        let v = i32::from(x) - i32::from(y);
        (v * v) as u32
    };
    d(a.0, b.0) + d(a.1, b.1) + d(a.2, b.2)
}

#[inline]
fn cube_index(v: u8) -> u8 {
    if v < 48 {
        0
    } else if v < 115 {
        1
    } else {
        (v - 35) / 40
    }
}

/// Nearest xterm-256 palette index: 6×6×6 cube or the 24-step gray ramp.
///
/// # Example
/// ```
/// use asc_core::color::rgb_to_ansi256;
/// assert_eq!(rgb_to_ansi256(255, 0, 0), 196);
/// assert_eq!(rgb_to_ansi256(0, 0, 0), 16);
/// assert_eq!(rgb_to_ansi256(128, 128, 128), 244);
/// ```
#[must_use]
pub fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    let (qr, qg, qb) = (cube_index(r), cube_index(g), cube_index(b));
    let cube = (
        CUBE_LEVELS[qr as usize],
        CUBE_LEVELS[qg as usize],
        CUBE_LEVELS[qb as usize],
    );
    let cube_idx = 16 + 36 * qr + 6 * qg + qb;
    if cube == (r, g, b) {
        return cube_idx;
    }

    let avg = ((u32::from(r) + u32::from(g) + u32::from(b)) / 3) as u8;
    let gray_idx = if avg > 238 { 23 } else { avg.saturating_sub(3) / 10 };
    let gray = 8 + 10 * gray_idx;

    if dist_sq((gray, gray, gray), (r, g, b)) < dist_sq(cube, (r, g, b)) {
        232 + gray_idx
    } else {
        cube_idx
    }
}

/// Nearest of the 16 standard colors (0..=15).
///
/// # Example
/// ```
/// use asc_core::color::rgb_to_ansi16;
/// assert_eq!(rgb_to_ansi16(250, 10, 10), 9);
/// assert_eq!(rgb_to_ansi16(0, 0, 0), 0);
/// ```
#[must_use]
pub fn rgb_to_ansi16(r: u8, g: u8, b: u8) -> u8 {
    let mut best = 0u8;
    let mut best_d = u32::MAX;
    for (i, &c) in ANSI16_PALETTE.iter().enumerate() {
        let d = dist_sq(c, (r, g, b));
        if d < best_d {
            best_d = d;
            best = i as u8;
        }
    }
    best
}

/// Réduit un pixel 16 bits en RGB 8 bits (`canal >> 8`).
///
/// # Example
/// ```
/// use asc_core::color::to_rgb8;
/// assert_eq!(to_rgb8((65535, 32896, 255, 65535)), (255, 128, 0));
/// ```
#[inline(always)]
#[must_use]
pub fn to_rgb8(px: (u16, u16, u16, u16)) -> (u8, u8, u8) {
    ((px.0 >> 8) as u8, (px.1 >> 8) as u8, (px.2 >> 8) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_colors_are_exact() {
        assert_eq!(rgb_to_ansi256(0, 95, 135), 16 + 6 + 2);
        assert_eq!(rgb_to_ansi256(255, 255, 255), 231);
    }

    #[test]
    fn grays_prefer_gray_ramp() {
        let idx = rgb_to_ansi256(100, 100, 100);
        assert!((232..=255).contains(&idx), "got {idx}");
    }

    #[test]
    fn ansi16_picks_primary_colors() {
        assert_eq!(rgb_to_ansi16(0, 250, 0), 10);
        assert_eq!(rgb_to_ansi16(0, 0, 230), 4);
        assert_eq!(rgb_to_ansi16(255, 255, 255), 15);
    }

    #[test]
    fn detection_order() {
        assert_eq!(
            ColorProfile::from_env_values(Some("24bit"), Some("dumb")),
            ColorProfile::TrueColor
        );
        assert_eq!(
            ColorProfile::from_env_values(Some("yes"), Some("xterm")),
            ColorProfile::Ansi16
        );
        assert_eq!(ColorProfile::from_env_values(None, None), ColorProfile::TrueColor);
    }
}
