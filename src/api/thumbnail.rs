//! Image download and decoding
//!
//! Thumbnails and detail previews are requested at their display size
//! through the templated image URL, then decoded to RGBA off the UI
//! thread. Nothing is written to disk.

use reqwest::Url;
use tokio::task;
use tracing::debug;

use super::client::{status_error, PicsumClient};
use super::error::ApiError;

/// A decoded image ready to hand to the renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// RGBA8 pixels, row-major
    pub pixels: Vec<u8>,
}

impl PicsumClient {
    /// Download an image and decode it
    pub async fn fetch_image(&self, url: Url) -> Result<DecodedImage, ApiError> {
        let bytes = match self.get_body(url, "image").await? {
            Ok(bytes) => bytes,
            Err(status) => return Err(status_error("image", status)),
        };

        // Spawn blocking because decoding a JPEG is CPU-bound
        task::spawn_blocking(move || decode_rgba(&bytes))
            .await
            .map_err(|e| ApiError::FetchFailed {
                status: None,
                message: format!("Image decode task failed: {}", e),
            })?
    }
}

/// Decode any format the `image` crate understands into RGBA8
pub fn decode_rgba(bytes: &[u8]) -> Result<DecodedImage, ApiError> {
    let img = image::load_from_memory(bytes).map_err(|e| ApiError::FetchFailed {
        status: None,
        message: format!("Failed to decode image: {}", e),
    })?;

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    debug!(width, height, "decoded image");

    Ok(DecodedImage {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn encoded_png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_decode_png() {
        let decoded = decode_rgba(&encoded_png(3, 2)).unwrap();

        assert_eq!((decoded.width, decoded.height), (3, 2));
        assert_eq!(decoded.pixels.len(), 3 * 2 * 4);
        assert_eq!(&decoded.pixels[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn test_decode_garbage() {
        let err = decode_rgba(b"definitely not an image").unwrap_err();
        assert!(err.to_string().starts_with("Failed to decode image"));
    }
}
