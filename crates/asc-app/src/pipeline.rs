use anyhow::Result;
use asc_ascii::compositor::Compositor;
use asc_core::color::ColorProfile;
use asc_core::config::RenderFlags;
use asc_core::frame::Viewport;
use asc_core::traits::ViewportProvider;
use asc_source::dispatch::{Dispatcher, validate_request};
use asc_source::resize::{CHAR_ASPECT_RATIO, Resampler};

/// Sous-pixels par cellule en mode Braille (colonnes, lignes).
const BRAILLE_CELL: (u32, u32) = (2, 4);

/// Réglages d'une conversion hors `RenderFlags`.
#[derive(Clone, Copy, Debug)]
pub struct ConvertOptions {
    /// Ratio hauteur/largeur d'une cellule.
    pub aspect_ratio: f64,
    /// Profil couleur déjà résolu.
    pub profile: ColorProfile,
    /// Braille : remplir tout le viewport (2×4 points par cellule) au lieu
    /// de redimensionner sur la grille de cellules.
    pub braille_fill: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            aspect_ratio: CHAR_ASPECT_RATIO,
            profile: ColorProfile::TrueColor,
            braille_fill: false,
        }
    }
}

/// Pixel grid to fit into, and the aspect ratio of one of its pixels.
///
/// By default the image is fitted to the cell viewport in both modes, so a
/// Braille render is `ceil(w/2) × ceil(h/4)` cells. With `braille_fill` the
/// grid grows by (2, 4) and each dot is half as tall, relative to its width,
/// as a cell.
fn target_grid(viewport: Viewport, braille: bool, options: &ConvertOptions) -> (Viewport, f64) {
    if braille && options.braille_fill {
        (
            Viewport::new(
                viewport.width.saturating_mul(BRAILLE_CELL.0),
                viewport.height.saturating_mul(BRAILLE_CELL.1),
            ),
            options.aspect_ratio * f64::from(BRAILLE_CELL.0) / f64::from(BRAILLE_CELL.1),
        )
    } else {
        (viewport, options.aspect_ratio)
    }
}

/// Convert one request into rendered art.
///
/// validate → load → query viewport → fit and resample → render.
/// A load failure returns before any resize or render work.
///
/// # Errors
/// Propagates load, geometry and resize errors.
pub fn convert(
    request: &str,
    flags: &RenderFlags,
    dispatcher: &Dispatcher,
    viewport: &dyn ViewportProvider,
    options: &ConvertOptions,
) -> Result<String> {
    validate_request(request)?;
    let bitmap = dispatcher.resolve(request)?;

    let vp = viewport.viewport()?;
    let (grid, aspect) = target_grid(vp, flags.braille, options);
    log::info!(
        "{request} : {}×{} px, viewport {}×{}",
        bitmap.width,
        bitmap.height,
        vp.width,
        vp.height
    );

    let resized = Resampler::new().resize_to_fit(&bitmap, grid, aspect)?;
    Ok(Compositor::new(options.profile).render(&resized, flags))
}
