use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Source or viewport with a zero dimension; nothing can be fitted.
    #[error(
        "Géométrie dégénérée : source {source_width}×{source_height}, viewport {max_width}×{max_height}"
    )]
    Geometry {
        /// Source width in pixels.
        source_width: u32,
        /// Source height in pixels.
        source_height: u32,
        /// Viewport width in cells.
        max_width: u32,
        /// Viewport height in cells.
        max_height: u32,
    },

    /// Buffer length does not match width/height.
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },
}

/// Errors raised while turning a request string into a [`Bitmap`](crate::frame::Bitmap).
#[derive(Error, Debug)]
pub enum LoadError {
    /// Local file does not exist.
    #[error("Fichier introuvable : {path}")]
    NotFound {
        /// Path that was not found.
        path: String,
    },

    /// Local file exists but could not be read.
    #[error("Impossible de lire {path} : {source}")]
    Io {
        /// Path being read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Server answered with a non-success status.
    #[error("Réponse HTTP {status} pour {url}")]
    Http {
        /// Requested URL.
        url: String,
        /// Status code returned.
        status: u16,
    },

    /// Transport-level failure (DNS, TLS, timeout...).
    #[error("Erreur réseau pour {url} : {message}")]
    Network {
        /// Requested URL.
        url: String,
        /// Transport error description.
        message: String,
    },

    /// Bytes could not be decoded as an image.
    #[error("Décodage impossible pour {request} : {message}")]
    Decode {
        /// Request that produced the bytes.
        request: String,
        /// Decoder error description.
        message: String,
    },

    /// Extension not in the supported list.
    #[error("Extension non supportée '{extension}' pour '{request}'")]
    UnsupportedExtension {
        /// Offending request.
        request: String,
        /// Extension found (may be empty).
        extension: String,
    },

    /// No resolver accepted the request.
    #[error("Aucun résolveur pour la requête '{request}'")]
    NoResolver {
        /// The unhandled request.
        request: String,
    },
}
