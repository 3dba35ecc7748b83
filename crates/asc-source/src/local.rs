use std::path::Path;

use asc_core::error::LoadError;
use asc_core::traits::{ImageResolver, Resolution};

use crate::image::load_image;
use crate::url::is_remote;

/// Résolveur de fichiers locaux. Prend en charge toute requête qui n'est pas une URL distante.
///
/// # Example
/// ```
/// use asc_source::local::LocalResolver;
/// use asc_core::traits::{ImageResolver, Resolution};
/// let r = LocalResolver;
/// assert!(matches!(r.try_load("https://example.com/a.png"), Ok(Resolution::NotApplicable)));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalResolver;

impl ImageResolver for LocalResolver {
    fn try_load(&self, request: &str) -> Result<Resolution, LoadError> {
        if is_remote(request) {
            return Ok(Resolution::NotApplicable);
        }
        load_image(Path::new(request)).map(Resolution::Loaded)
    }

    fn name(&self) -> &'static str {
        "local"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::tests::png_bytes;

    #[test]
    fn loads_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dot.png");
        std::fs::write(&path, png_bytes(4, 2, [0, 0, 0, 255])).unwrap();

        match LocalResolver.try_load(path.to_str().unwrap()) {
            Ok(Resolution::Loaded(bmp)) => assert_eq!((bmp.width, bmp.height), (4, 2)),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn missing_file_surfaces_not_found() {
        let err = LocalResolver.try_load("/no/such/image.png").unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
    }
}
