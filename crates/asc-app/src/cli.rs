use std::path::PathBuf;

use asc_core::color::ColorProfile;
use asc_core::config::{AppConfig, ColorChoice};
use clap::{Parser, ValueEnum};

/// Borne haute de `--width` / `--height`, en cellules.
const MAX_VIEWPORT_CELLS: i64 = 4096;

/// asciinator : transforme une image en art ASCII dans le terminal.
#[derive(Parser, Debug)]
#[command(
    name = "asciinator",
    version,
    about,
    long_about = "Transforme une image (fichier local ou URL http/https) en art ASCII ou Braille \
                  et l'affiche dans le terminal. Formats : jpg, jpeg, png, webp, gif."
)]
pub struct Cli {
    /// Chemins ou URLs des images à convertir.
    #[arg(required = true, value_name = "IMAGE")]
    pub images: Vec<String>,

    /// Rampe de caractères personnalisée, du plus sombre au plus clair.
    #[arg(short = 'm', long)]
    pub custom_map: Option<String>,

    /// Sortie en couleur.
    #[arg(short, long, overrides_with = "no_colored")]
    pub colored: bool,

    /// Désactive la couleur même si la config l'active.
    #[arg(long, overrides_with = "colored")]
    pub no_colored: bool,

    /// Mode Braille (2×4 points par caractère).
    #[arg(short, long, overrides_with = "no_braille")]
    pub braille: bool,

    /// Désactive le mode Braille même si la config l'active.
    #[arg(long, overrides_with = "braille")]
    pub no_braille: bool,

    /// Braille : remplir tout le viewport au lieu de la grille de cellules.
    #[arg(long, overrides_with = "no_braille_fill")]
    pub braille_fill: bool,

    #[arg(long, overrides_with = "braille_fill", hide = true)]
    pub no_braille_fill: bool,

    /// Profil couleur des séquences d'échappement.
    #[arg(long, value_enum)]
    pub color_profile: Option<ProfileArg>,

    /// Largeur fixe du viewport (colonnes). Requiert --height.
    #[arg(
        long,
        requires = "height",
        value_parser = clap::value_parser!(u32).range(1..=MAX_VIEWPORT_CELLS)
    )]
    pub width: Option<u32>,

    /// Hauteur fixe du viewport (lignes). Requiert --width.
    #[arg(
        long,
        requires = "width",
        value_parser = clap::value_parser!(u32).range(1..=MAX_VIEWPORT_CELLS)
    )]
    pub height: Option<u32>,

    /// Fichier de configuration TOML. Défaut : $HOME/.asciinator.toml.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: log::LevelFilter,
}

/// Valeurs CLI de `--color-profile`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ProfileArg {
    Auto,
    Truecolor,
    Ansi256,
    Ansi16,
    None,
}

impl From<ProfileArg> for ColorChoice {
    fn from(p: ProfileArg) -> Self {
        match p {
            ProfileArg::Auto => Self::Auto,
            ProfileArg::Truecolor => Self::Forced(ColorProfile::TrueColor),
            ProfileArg::Ansi256 => Self::Forced(ColorProfile::Ansi256),
            ProfileArg::Ansi16 => Self::Forced(ColorProfile::Ansi16),
            ProfileArg::None => Self::Forced(ColorProfile::NoColor),
        }
    }
}

impl Cli {
    /// Merge CLI flags over the config file values. CLI wins.
    ///
    /// `--x` / `--no-x` pairs override the file either way; the last one given wins.
    #[must_use]
    pub fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(ref map) = self.custom_map {
            config.flags.custom_map.clone_from(map);
        }
        if let Some(on) = switch(self.colored, self.no_colored) {
            config.flags.colored = on;
        }
        if let Some(on) = switch(self.braille, self.no_braille) {
            config.flags.braille = on;
        }
        if let Some(on) = switch(self.braille_fill, self.no_braille_fill) {
            config.braille_fill = on;
        }
        if let Some(p) = self.color_profile {
            config.color = p.into();
        }
        config
    }

    /// Fixed viewport requested on the command line, if any.
    #[must_use]
    pub fn fixed_viewport(&self) -> Option<(u32, u32)> {
        self.width.zip(self.height)
    }
}

/// État demandé par une paire `--x` / `--no-x`, `None` si aucune n'est passée.
fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}
