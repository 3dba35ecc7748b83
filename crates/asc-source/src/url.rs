use std::time::Duration;

use asc_core::error::LoadError;
use asc_core::traits::{ImageResolver, Resolution};
use reqwest::Url;
use reqwest::blocking::Client;

use crate::image::decode_bytes;

/// Timeout par défaut d'un téléchargement.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// `true` si `request` est une URL `http` ou `https`.
///
/// # Example
/// ```
/// use asc_source::url::is_remote;
/// assert!(is_remote("https://example.com/cat.png"));
/// assert!(!is_remote("cat.png"));
/// assert!(!is_remote("file:///tmp/cat.png"));
/// ```
#[must_use]
pub fn is_remote(request: &str) -> bool {
    parse_remote(request).is_some()
}

pub(crate) fn parse_remote(request: &str) -> Option<Url> {
    Url::parse(request)
        .ok()
        .filter(|u| matches!(u.scheme(), "http" | "https"))
}

/// Résolveur HTTP(S) : télécharge puis décode l'image.
pub struct UrlResolver {
    client: Client,
}

impl UrlResolver {
    /// Create a resolver whose requests time out after `timeout`.
    ///
    /// # Errors
    /// Returns [`LoadError::Network`] if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, LoadError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("asciinator/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LoadError::Network {
                url: String::new(),
                message: e.to_string(),
            })?;
        Ok(Self { client })
    }

    fn fetch(&self, url: Url) -> Result<Vec<u8>, LoadError> {
        let display = url.to_string();
        let network = |e: reqwest::Error| LoadError::Network {
            url: display.clone(),
            message: e.to_string(),
        };

        log::info!("Téléchargement de {display}");
        let response = self.client.get(url).send().map_err(network)?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Http {
                url: display.clone(),
                status: status.as_u16(),
            });
        }
        let bytes = response.bytes().map_err(network)?;
        log::debug!("{} octets reçus de {display}", bytes.len());
        Ok(bytes.to_vec())
    }
}

impl ImageResolver for UrlResolver {
    fn try_load(&self, request: &str) -> Result<Resolution, LoadError> {
        let Some(url) = parse_remote(request) else {
            return Ok(Resolution::NotApplicable);
        };
        let bytes = self.fetch(url)?;
        decode_bytes(request, &bytes).map(Resolution::Loaded)
    }

    fn name(&self) -> &'static str {
        "url"
    }
}
