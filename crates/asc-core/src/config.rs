use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::color::ColorProfile;

/// Drapeaux de rendu d'une conversion. Immuable une fois construit.
///
/// # Example
/// ```
/// use asc_core::config::RenderFlags;
/// let flags = RenderFlags::default();
/// assert!(flags.custom_map.is_empty());
/// assert!(!flags.colored && !flags.braille);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RenderFlags {
    /// Rampe de glyphes personnalisée. Vide = rampe par défaut.
    pub custom_map: String,
    /// Émettre des séquences de couleur.
    pub colored: bool,
    /// Mode Braille (blocs 2×4).
    pub braille: bool,
}

/// Choix du profil couleur : détecté ou forcé.
///
/// # Example
/// ```
/// use asc_core::config::ColorChoice;
/// use asc_core::color::ColorProfile;
/// assert_eq!(ColorChoice::Forced(ColorProfile::Ansi16).resolve(), ColorProfile::Ansi16);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorChoice {
    /// Lire `COLORTERM` / `TERM`.
    #[default]
    Auto,
    /// Profil imposé.
    Forced(ColorProfile),
}

impl ColorChoice {
    /// Resolve to a concrete profile.
    #[must_use]
    pub fn resolve(self) -> ColorProfile {
        match self {
            Self::Auto => ColorProfile::detect(),
            Self::Forced(p) => p,
        }
    }
}

/// Configuration complète de l'outil, chargée depuis TOML.
///
/// Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use asc_core::config::AppConfig;
/// let config = AppConfig::default();
/// assert_eq!(config.aspect_ratio, 2.0);
/// assert_eq!(config.border_rows, 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// Flags de rendu par défaut (surchargés par la CLI).
    pub flags: RenderFlags,
    /// Profil couleur.
    pub color: ColorChoice,
    /// Correction aspect ratio (hauteur/largeur d'une cellule terminal).
    pub aspect_ratio: f32,
    /// Braille : redimensionner sur 2×4 points par cellule pour remplir le viewport.
    pub braille_fill: bool,
    /// Lignes retirées de la hauteur du terminal (prompt, marges).
    pub border_rows: u32,
    /// Viewport utilisé si la taille du terminal est inconnue.
    pub fallback_width: u32,
    /// See `fallback_width`.
    pub fallback_height: u32,
    /// Timeout réseau en secondes.
    pub timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            flags: RenderFlags::default(),
            color: ColorChoice::Auto,
            aspect_ratio: 2.0,
            braille_fill: false,
            border_rows: 2,
            fallback_width: 80,
            fallback_height: 24,
            timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// Clamp all numeric fields to their valid ranges.
    /// Called after TOML deserialization to prevent out-of-range values.
    pub fn clamp_all(&mut self) {
        self.aspect_ratio = if self.aspect_ratio.is_finite() {
            self.aspect_ratio.clamp(0.5, 4.0)
        } else {
            2.0
        };
        self.border_rows = self.border_rows.min(16);
        self.fallback_width = self.fallback_width.clamp(1, 4096);
        self.fallback_height = self.fallback_height.clamp(1, 4096);
        self.timeout_secs = self.timeout_secs.clamp(1, 600);
    }
}

/// Valeur TOML de `color_profile`.
#[derive(Clone, Copy, Debug, Deserialize)]
enum ProfileSetting {
    Auto,
    TrueColor,
    Ansi256,
    Ansi16,
    NoColor,
}

impl From<ProfileSetting> for ColorChoice {
    fn from(p: ProfileSetting) -> Self {
        match p {
            ProfileSetting::Auto => Self::Auto,
            ProfileSetting::TrueColor => Self::Forced(ColorProfile::TrueColor),
            ProfileSetting::Ansi256 => Self::Forced(ColorProfile::Ansi256),
            ProfileSetting::Ansi16 => Self::Forced(ColorProfile::Ansi16),
            ProfileSetting::NoColor => Self::Forced(ColorProfile::NoColor),
        }
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    render: Option<RenderSection>,
    viewport: Option<ViewportSection>,
    network: Option<NetworkSection>,
}

/// Render section, all fields optional for partial override.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RenderSection {
    custom_map: Option<String>,
    colored: Option<bool>,
    braille: Option<bool>,
    color_profile: Option<ProfileSetting>,
    aspect_ratio: Option<f32>,
    braille_fill: Option<bool>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ViewportSection {
    border_rows: Option<u32>,
    fallback_width: Option<u32>,
    fallback_height: Option<u32>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct NetworkSection {
    timeout_secs: Option<u64>,
}

/// Parse a TOML document and merge it over the defaults.
///
/// # Errors
/// Returns an error if the document is not valid TOML or has unknown keys.
///
/// # Example
/// ```
/// use asc_core::config::parse_config;
/// let config = parse_config("[render]\ncolored = true\n").unwrap();
/// assert!(config.flags.colored);
/// ```
pub fn parse_config(content: &str) -> Result<AppConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;
    let mut config = AppConfig::default();

    if let Some(r) = file.render {
        if let Some(v) = r.custom_map {
            config.flags.custom_map = v;
        }
        if let Some(v) = r.colored {
            config.flags.colored = v;
        }
        if let Some(v) = r.braille {
            config.flags.braille = v;
        }
        if let Some(v) = r.color_profile {
            config.color = v.into();
        }
        if let Some(v) = r.aspect_ratio {
            config.aspect_ratio = v;
        }
        if let Some(v) = r.braille_fill {
            config.braille_fill = v;
        }
    }
    if let Some(v) = file.viewport {
        if let Some(n) = v.border_rows {
            config.border_rows = n;
        }
        if let Some(n) = v.fallback_width {
            config.fallback_width = n;
        }
        if let Some(n) = v.fallback_height {
            config.fallback_height = n;
        }
    }
    if let Some(n) = file.network.and_then(|n| n.timeout_secs) {
        config.timeout_secs = n;
    }

    config.clamp_all();
    Ok(config)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use asc_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("asciinator.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    let config = parse_config(&content)
        .with_context(|| format!("Configuration invalide dans {}", path.display()))?;
    log::debug!("Config chargée depuis {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(parse_config("").unwrap(), AppConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = parse_config(
            r#"
            [render]
            custom_map = " .#"
            braille = true
            color_profile = "Ansi256"
            braille_fill = true

            [network]
            timeout_secs = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.flags.custom_map, " .#");
        assert!(config.flags.braille);
        assert!(config.braille_fill);
        assert!(!config.flags.colored);
        assert_eq!(config.color, ColorChoice::Forced(ColorProfile::Ansi256));
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.border_rows, 2);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config = parse_config(
            "[render]\naspect_ratio = 40.0\n[viewport]\nfallback_width = 0\n",
        )
        .unwrap();
        assert!((config.aspect_ratio - 4.0).abs() < f32::EPSILON);
        assert_eq!(config.fallback_width, 1);
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(parse_config("[render]\ncolour = true\n").is_err());
    }

    #[test]
    fn load_reads_file_and_reports_missing() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[viewport]\nborder_rows = 0").unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.border_rows, 0);

        let err = load_config(Path::new("/nonexistent/asciinator.toml")).unwrap_err();
        assert!(err.to_string().contains("Impossible de lire"));
    }
}
