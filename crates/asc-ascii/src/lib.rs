pub mod braille;
pub mod color_map;
/// Moteur de conversion image → texte d'asciinator.
///
/// Converts 16-bit bitmaps to ASCII or Braille strings, optionally
/// wrapped in terminal color escapes.
pub mod compositor;
pub mod luminance;

pub use compositor::{Compositor, render, render_with_profile};
