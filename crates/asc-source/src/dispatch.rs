use std::path::Path;
use std::time::Duration;

use asc_core::error::LoadError;
use asc_core::frame::Bitmap;
use asc_core::traits::{ImageResolver, Resolution};

use crate::local::LocalResolver;
use crate::url::{UrlResolver, parse_remote};

/// Extensions acceptées (comparaison insensible à la casse).
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

/// Extension of a request: the URL path for remote requests (query and
/// fragment ignored), the file name otherwise. Empty if there is none.
///
/// # Example
/// ```
/// use asc_source::dispatch::request_extension;
/// assert_eq!(request_extension("a/b/photo.JPG"), "JPG");
/// assert_eq!(request_extension("https://x.org/cat.png?size=2"), "png");
/// assert_eq!(request_extension("README"), "");
/// ```
#[must_use]
pub fn request_extension(request: &str) -> String {
    let path = match parse_remote(request) {
        Some(url) => url.path().to_string(),
        None => request.to_string(),
    };
    Path::new(&path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_string()
}

/// Reject requests whose extension is not in [`SUPPORTED_EXTENSIONS`].
///
/// # Errors
/// Returns [`LoadError::UnsupportedExtension`].
///
/// # Example
/// ```
/// use asc_source::dispatch::validate_request;
/// assert!(validate_request("cat.webp").is_ok());
/// assert!(validate_request("notes.txt").is_err());
/// ```
pub fn validate_request(request: &str) -> Result<(), LoadError> {
    let extension = request_extension(request);
    if SUPPORTED_EXTENSIONS
        .iter()
        .any(|e| e.eq_ignore_ascii_case(&extension))
    {
        Ok(())
    } else {
        Err(LoadError::UnsupportedExtension {
            request: request.to_string(),
            extension,
        })
    }
}

/// Liste ordonnée de résolveurs, essayés jusqu'au premier qui prend la requête.
///
/// # Example
/// ```
/// use asc_source::dispatch::Dispatcher;
/// use asc_core::error::LoadError;
/// let empty = Dispatcher::new();
/// assert!(matches!(empty.resolve("cat.png"), Err(LoadError::NoResolver { .. })));
/// ```
#[derive(Default)]
pub struct Dispatcher {
    resolvers: Vec<Box<dyn ImageResolver>>,
}

impl Dispatcher {
    /// Dispatcher sans résolveur.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// URL first, then local files.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_defaults(timeout: Duration) -> Result<Self, LoadError> {
        Ok(Self::new()
            .with(UrlResolver::new(timeout)?)
            .with(LocalResolver))
    }

    /// Append a resolver at the end of the chain.
    #[must_use]
    pub fn with(mut self, resolver: impl ImageResolver + 'static) -> Self {
        self.resolvers.push(Box::new(resolver));
        self
    }

    /// Noms des résolveurs, dans l'ordre.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.resolvers.iter().map(|r| r.name()).collect()
    }

    /// Resolve `request` to a bitmap.
    ///
    /// The first resolver returning `Loaded` wins. An error from an applicable
    /// resolver ends the search immediately.
    ///
    /// # Errors
    /// The applicable resolver's [`LoadError`], or [`LoadError::NoResolver`]
    /// if none applies.
    pub fn resolve(&self, request: &str) -> Result<Bitmap, LoadError> {
        for resolver in &self.resolvers {
            match resolver.try_load(request)? {
                Resolution::Loaded(bitmap) => {
                    log::debug!("'{request}' résolu par {}", resolver.name());
                    return Ok(bitmap);
                }
                Resolution::NotApplicable => {
                    log::trace!("{} : non applicable à '{request}'", resolver.name());
                }
            }
        }
        Err(LoadError::NoResolver {
            request: request.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct Prefix {
        prefix: &'static str,
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    impl ImageResolver for Prefix {
        fn try_load(&self, request: &str) -> Result<Resolution, LoadError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !request.starts_with(self.prefix) {
                return Ok(Resolution::NotApplicable);
            }
            if self.fail {
                return Err(LoadError::NotFound {
                    path: request.to_string(),
                });
            }
            Ok(Resolution::Loaded(Bitmap::new(self.prefix.len() as u32, 1)))
        }

        fn name(&self) -> &'static str {
            self.prefix
        }
    }

    fn prefix(prefix: &'static str, fail: bool) -> (Prefix, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Prefix {
                prefix,
                calls: Arc::clone(&calls),
                fail,
            },
            calls,
        )
    }

    #[test]
    fn first_applicable_resolver_wins() {
        let (a, a_calls) = prefix("a", false);
        let (ab, ab_calls) = prefix("ab", false);
        let d = Dispatcher::new().with(a).with(ab);
        assert_eq!(d.resolve("abc").unwrap().width, 1);
        assert_eq!(a_calls.load(Ordering::SeqCst), 1);
        assert_eq!(ab_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn not_applicable_falls_through() {
        let (x, _) = prefix("x", false);
        let (ab, _) = prefix("ab", false);
        let d = Dispatcher::new().with(x).with(ab);
        assert_eq!(d.resolve("abc").unwrap().width, 2);
        assert_eq!(d.names(), vec!["x", "ab"]);
    }

    #[test]
    fn applicable_error_short_circuits() {
        let (a, _) = prefix("a", true);
        let (any, any_calls) = prefix("", false);
        let d = Dispatcher::new().with(a).with(any);
        assert!(matches!(d.resolve("abc"), Err(LoadError::NotFound { .. })));
        assert_eq!(any_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn nothing_applicable_is_no_resolver() {
        let (z, _) = prefix("z", false);
        let d = Dispatcher::new().with(z);
        assert!(matches!(d.resolve("abc"), Err(LoadError::NoResolver { .. })));
    }

    #[test]
    fn default_chain_is_url_then_local() {
        let d = Dispatcher::with_defaults(Duration::from_secs(1)).unwrap();
        assert_eq!(d.names(), vec!["url", "local"]);
    }

    #[test]
    fn extension_validation() {
        for ok in ["a.jpg", "a.JPEG", "dir/b.png", "c.webp", "d.gif", "https://h/e.png?x=1"] {
            assert!(validate_request(ok).is_ok(), "{ok}");
        }
        for bad in ["a.bmp", "noext", "https://h/page", "https://h/x.txt#a.png"] {
            assert!(
                matches!(validate_request(bad), Err(LoadError::UnsupportedExtension { .. })),
                "{bad}"
            );
        }
    }
}
