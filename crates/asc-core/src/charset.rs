/// 70 caractères, rampe de Paul Bourke, index 0 = le plus sombre.
pub const DEFAULT_RAMP: &str =
    " .'`^\",:;Il!i><~+_-?][}{1)(|\\/tfjrxnuvczXYUJCLQ0OZmwqpdbkhao*#MW&8%B@$";

/// Rampe de glyphes ordonnée, avec table de correspondance luminance → caractère.
///
/// Pre-computed once per conversion for O(1) per-pixel cost. An empty
/// ramp falls back to [`DEFAULT_RAMP`], so mapping never sees an empty set.
///
/// # Example
/// ```
/// use asc_core::charset::GlyphRamp;
/// let ramp = GlyphRamp::new(" .:#@");
/// assert_eq!(ramp.map(0), ' ');
/// assert_eq!(ramp.map(255), '@');
/// ```
#[derive(Clone)]
pub struct GlyphRamp {
    glyphs: Vec<char>,
    lut: [char; 256],
}

impl GlyphRamp {
    /// Build a ramp from characters ordered darkest → brightest.
    ///
    /// # Example
    /// ```
    /// use asc_core::charset::{GlyphRamp, DEFAULT_RAMP};
    /// let ramp = GlyphRamp::new("");
    /// assert_eq!(ramp.as_str(), DEFAULT_RAMP);
    /// ```
    #[must_use]
    pub fn new(ramp: &str) -> Self {
        let source = if ramp.is_empty() { DEFAULT_RAMP } else { ramp };
        let glyphs: Vec<char> = source.chars().collect();
        let mut lut = [' '; 256];
        for (lum, slot) in lut.iter_mut().enumerate() {
            *slot = glyphs[glyph_index(lum as u8, glyphs.len())];
        }
        Self { glyphs, lut }
    }

    /// Map a luminance value [0..255] to a glyph.
    ///
    /// # Example
    /// ```
    /// use asc_core::charset::GlyphRamp;
    /// let ramp = GlyphRamp::new("AB");
    /// assert_eq!(ramp.map(127), 'A');
    /// assert_eq!(ramp.map(128), 'B');
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn map(&self, luminance: u8) -> char {
        self.lut[luminance as usize]
    }

    /// Nombre de glyphes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Always `false`: the default ramp replaces an empty one.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// The glyphs as a string, darkest first.
    #[must_use]
    pub fn as_str(&self) -> String {
        self.glyphs.iter().collect()
    }
}

impl Default for GlyphRamp {
    fn default() -> Self {
        Self::new(DEFAULT_RAMP)
    }
}

/// Map a luminance to a glyph of `ramp`, substituting the default ramp when empty.
///
/// One-shot variant of [`GlyphRamp::map`]; builds nothing.
///
/// # Example
/// ```
/// use asc_core::charset::map_to_glyph;
/// assert_eq!(map_to_glyph(255, "AB"), 'B');
/// assert_eq!(map_to_glyph(0, ""), ' ');
/// ```
#[must_use]
pub fn map_to_glyph(luminance: u8, ramp: &str) -> char {
    let ramp = if ramp.is_empty() { DEFAULT_RAMP } else { ramp };
    let len = ramp.chars().count();
    ramp.chars()
        .nth(glyph_index(luminance, len))
        .unwrap_or(' ')
}

/// `floor(luminance * len / 256)`, clamped to `len - 1`.
#[inline(always)]
fn glyph_index(luminance: u8, len: usize) -> usize {
    (usize::from(luminance) * len / 256).min(len.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ramp_has_70_glyphs() {
        assert_eq!(DEFAULT_RAMP.chars().count(), 70);
        assert!(DEFAULT_RAMP.starts_with(' '));
        assert!(DEFAULT_RAMP.ends_with('$'));
    }

    #[test]
    fn ramp_maps_extremes() {
        let ramp = GlyphRamp::new(" .:#@");
        assert_eq!(ramp.map(0), ' ');
        assert_eq!(ramp.map(255), '@');
    }

    #[test]
    fn ramp_monotonic() {
        for charset in [DEFAULT_RAMP, " .:-=+*#%@", " ░▒▓█", "AB", "xyz"] {
            let chars: Vec<char> = charset.chars().collect();
            let ramp = GlyphRamp::new(charset);
            let mut prev_idx = 0usize;
            for i in 0..=255u8 {
                let ch = ramp.map(i);
                let idx = chars.iter().position(|&c| c == ch).unwrap();
                assert!(idx >= prev_idx, "rampe non monotone à luminance {i}");
                prev_idx = idx;
            }
        }
    }

    #[test]
    fn brightest_is_last_glyph() {
        for charset in ["A", "AB", "abc", " .:-=+*#%@", DEFAULT_RAMP] {
            let last = charset.chars().last().unwrap();
            assert_eq!(GlyphRamp::new(charset).map(255), last);
            assert_eq!(map_to_glyph(255, charset), last);
        }
    }

    #[test]
    fn mid_gray_hits_index_35_of_default() {
        let expected = DEFAULT_RAMP.chars().nth(35).unwrap();
        assert_eq!(expected, 'n');
        assert_eq!(GlyphRamp::default().map(128), expected);
    }

    #[test]
    fn empty_ramp_equals_default() {
        let empty = GlyphRamp::new("");
        let default = GlyphRamp::default();
        for i in 0..=255u8 {
            assert_eq!(empty.map(i), default.map(i));
            assert_eq!(map_to_glyph(i, ""), default.map(i));
        }
        assert!(!empty.is_empty());
        assert_eq!(empty.len(), 70);
    }

    #[test]
    fn lut_agrees_with_one_shot_mapping() {
        let blocks = " ░▒▓█";
        let ramp = GlyphRamp::new(blocks);
        for i in 0..=255u8 {
            assert_eq!(ramp.map(i), map_to_glyph(i, blocks));
        }
    }

    #[test]
    fn multibyte_glyphs_count_as_one() {
        let ramp = GlyphRamp::new("░█");
        assert_eq!(ramp.len(), 2);
        assert_eq!(ramp.map(0), '░');
        assert_eq!(ramp.map(200), '█');
    }
}
