use std::path::Path;

use asc_core::error::LoadError;
use asc_core::frame::Bitmap;

/// Décode des octets (PNG, JPEG, GIF, WebP, BMP) en [`Bitmap`] 16 bits pré-multiplié.
///
/// The format is sniffed from the content, not from the request's extension.
/// Animated GIFs yield their first frame.
///
/// # Errors
/// Returns [`LoadError::Decode`] if the bytes are not a supported image.
///
/// # Example
/// ```
/// use asc_source::image::decode_bytes;
/// assert!(decode_bytes("garbage", b"not an image").is_err());
/// ```
pub fn decode_bytes(request: &str, bytes: &[u8]) -> Result<Bitmap, LoadError> {
    let img = image::load_from_memory(bytes).map_err(|e| LoadError::Decode {
        request: request.to_string(),
        message: e.to_string(),
    })?;
    let rgba = img.to_rgba16();
    let (width, height) = rgba.dimensions();
    log::debug!("Image décodée {request} : {width}×{height}");
    Bitmap::from_straight_rgba16(width, height, rgba.into_raw()).map_err(|e| LoadError::Decode {
        request: request.to_string(),
        message: e.to_string(),
    })
}

/// Charge une image depuis le disque.
///
/// # Errors
/// [`LoadError::NotFound`] if the path does not exist, [`LoadError::Io`] if it
/// cannot be read, [`LoadError::Decode`] if it is not an image.
///
/// # Example
/// ```no_run
/// use asc_source::image::load_image;
/// use std::path::Path;
/// let bitmap = load_image(Path::new("test.png")).unwrap();
/// ```
pub fn load_image(path: &Path) -> Result<Bitmap, LoadError> {
    let display = path.display().to_string();
    let bytes = std::fs::read(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            LoadError::NotFound { path: display.clone() }
        } else {
            LoadError::Io {
                path: display.clone(),
                source,
            }
        }
    })?;
    decode_bytes(&display, &bytes)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::io::Cursor;

    use image::{ImageFormat, Rgba, RgbaImage};

    use super::*;

    /// Encode a small RGBA image as PNG bytes.
    pub(crate) fn png_bytes(width: u32, height: u32, px: [u8; 4]) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba(px));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn decodes_png_to_16_bit() {
        let bmp = decode_bytes("mem", &png_bytes(3, 2, [255, 0, 128, 255])).unwrap();
        assert_eq!((bmp.width, bmp.height), (3, 2));
        assert_eq!(bmp.pixel(2, 1), (65535, 0, 128 * 257, 65535));
    }

    #[test]
    fn alpha_is_premultiplied() {
        let bmp = decode_bytes("mem", &png_bytes(1, 1, [255, 255, 255, 0])).unwrap();
        assert_eq!(bmp.pixel(0, 0), (0, 0, 0, 0));
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = load_image(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
    }

    #[test]
    fn corrupt_file_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"\x89PNG but not really").unwrap();
        assert!(matches!(load_image(&path), Err(LoadError::Decode { .. })));
    }
}
