use anyhow::Result;

use crate::error::LoadError;
use crate::frame::{Bitmap, Viewport};

/// Issue d'une tentative de chargement par un résolveur.
#[derive(Debug)]
pub enum Resolution {
    /// Le résolveur a pris la requête en charge et l'image est décodée.
    Loaded(Bitmap),
    /// La requête ne concerne pas ce résolveur ; essayer le suivant.
    NotApplicable,
}

/// Transforme une requête (chemin, URL...) en [`Bitmap`].
///
/// Implémenté par : `LocalResolver`, `UrlResolver`.
///
/// # Example
/// ```
/// use asc_core::traits::{ImageResolver, Resolution};
/// use asc_core::error::LoadError;
///
/// struct NeverResolver;
/// impl ImageResolver for NeverResolver {
///     fn try_load(&self, _request: &str) -> Result<Resolution, LoadError> {
///         Ok(Resolution::NotApplicable)
///     }
///     fn name(&self) -> &'static str { "never" }
/// }
/// ```
pub trait ImageResolver: Send + Sync {
    /// Tente de charger `request`.
    ///
    /// Retourne `NotApplicable` si la requête n'est pas de son ressort.
    /// Une erreur signifie que la requête était applicable mais a échoué.
    ///
    /// # Errors
    /// Returns a [`LoadError`] when an applicable request fails.
    fn try_load(&self, request: &str) -> Result<Resolution, LoadError>;

    /// Nom lisible pour les logs.
    fn name(&self) -> &'static str;
}

/// Fournit la taille courante du terminal.
///
/// Interrogé à chaque conversion, jamais mis en cache.
///
/// # Example
/// ```
/// use asc_core::traits::ViewportProvider;
/// use asc_core::frame::Viewport;
///
/// struct Fixed;
/// impl ViewportProvider for Fixed {
///     fn viewport(&self) -> anyhow::Result<Viewport> { Ok(Viewport::new(80, 24)) }
/// }
/// assert_eq!(Fixed.viewport().unwrap().width, 80);
/// ```
pub trait ViewportProvider {
    /// Current viewport, each dimension ≥ 1.
    ///
    /// # Errors
    /// Returns an error if the size cannot be determined.
    fn viewport(&self) -> Result<Viewport>;
}
