/// Types partagés, configuration et traits d'asciinator.
///
/// This crate contains the shared types (bitmap, viewport, glyph ramp,
/// render flags), errors, traits and config loading used across the
/// asciinator workspace.

pub mod charset;
pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod traits;

pub use charset::GlyphRamp;
pub use color::ColorProfile;
pub use config::{AppConfig, RenderFlags};
pub use error::{CoreError, LoadError};
pub use frame::{Bitmap, Viewport};
