//! Image ingestion pipeline
//!
//! Turns a user-selected image file into the compressed inline JPEG stored
//! on a project record: read → decode → bounded resize → encode → base64.
//! The async entry point keeps the UI loop responsive; the CPU-bound work
//! runs on a blocking thread.

use std::path::PathBuf;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType};
use thiserror::Error;
use tokio::task;

/// Longest edge of a stored image, in pixels
pub const MAX_DIMENSION: u32 = 1200;

/// JPEG quality factor (0-100). 70 keeps records small enough for the
/// catalog file without visible damage to renovation photos.
pub const JPEG_QUALITY: u8 = 70;

const DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

/// One failure per pipeline stage, so the UI can say what actually broke
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("could not read the image file: {0}")]
    Read(std::io::Error),
    #[error("not a decodable image: {0}")]
    Decode(image::ImageError),
    #[error("could not re-encode the image: {0}")]
    Encode(image::ImageError),
    #[error("image processing task failed: {0}")]
    Task(task::JoinError),
}

/// Ingest one image file for storage on a project record.
///
/// Reads the file, decodes it, downscales so the longest edge fits within
/// [`MAX_DIMENSION`] (never upscaling), re-encodes as JPEG at the fixed
/// quality factor and wraps the result in a base64 data URL. The stages run
/// strictly in sequence; only one ingestion per form slot is ever in flight
/// because the slot's picker is disabled while this resolves.
pub async fn ingest_image(path: PathBuf) -> Result<String, IngestError> {
    let bytes = tokio::fs::read(&path).await.map_err(IngestError::Read)?;

    // Decode + resize + encode are CPU-intensive, keep them off the UI loop
    task::spawn_blocking(move || compress_to_data_url(&bytes))
        .await
        .map_err(IngestError::Task)?
}

/// Blocking decode → resize → encode step
fn compress_to_data_url(bytes: &[u8]) -> Result<String, IngestError> {
    let img = image::load_from_memory(bytes).map_err(IngestError::Decode)?;

    let (width, height) = (img.width(), img.height());
    let (target_w, target_h) = target_dimensions(width, height);

    let img = if (target_w, target_h) != (width, height) {
        println!(
            "🖼️  Downscaling {}x{} → {}x{}",
            width, height, target_w, target_h
        );
        img.resize_exact(target_w, target_h, FilterType::Lanczos3)
    } else {
        img
    };

    encode_jpeg_data_url(&img)
}

/// Constrained-aspect-ratio bounding-box math.
///
/// Landscape (and square) images key on width, portrait images on height;
/// whichever edge is longer is capped at [`MAX_DIMENSION`] and the other
/// edge scales by the same factor. Images already within bounds pass
/// through untouched — this never upscales.
pub fn target_dimensions(width: u32, height: u32) -> (u32, u32) {
    let max = MAX_DIMENSION as f64;
    let mut w = width as f64;
    let mut h = height as f64;

    if width >= height {
        if w > max {
            h *= max / w;
            w = max;
        }
    } else if h > max {
        w *= max / h;
        h = max;
    }

    (w as u32, h as u32)
}

/// Encode an image as a JPEG data URL at the fixed quality factor
pub fn encode_jpeg_data_url(img: &DynamicImage) -> Result<String, IngestError> {
    // JPEG has no alpha channel; flatten whatever the decoder produced
    let rgb = img.to_rgb8();

    let mut jpeg = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY);
    encoder
        .encode(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
        .map_err(IngestError::Encode)?;

    Ok(format!("{}{}", DATA_URL_PREFIX, BASE64.encode(&jpeg)))
}

/// Raw JPEG bytes behind a stored data URL, for rendering.
/// Returns `None` when the string is not one of our data URLs.
pub fn data_url_bytes(data_url: &str) -> Option<Vec<u8>> {
    let encoded = data_url.strip_prefix(DATA_URL_PREFIX)?;
    BASE64.decode(encoded).ok()
}

/// Solid-colour placeholder image used by the built-in seed projects
pub fn placeholder_data_url(r: u8, g: u8, b: u8) -> String {
    let img = DynamicImage::ImageRgb8(image::RgbImage::from_pixel(800, 600, image::Rgb([r, g, b])));
    encode_jpeg_data_url(&img).expect("encoding a solid-colour image in memory cannot fail")
}
