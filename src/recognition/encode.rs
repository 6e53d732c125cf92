//! Surface serialization for the wire

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{ImageFormat, RgbaImage};

use super::error::RecognitionError;

/// Data URL prefix the endpoint expects
pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Encode an image as PNG bytes
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, RecognitionError> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Wrap PNG bytes in a base64 data URL
pub fn png_data_url(png: &[u8]) -> String {
    format!("{}{}", PNG_DATA_URL_PREFIX, STANDARD.encode(png))
}

/// Encode an image straight to a PNG data URL
pub fn image_to_data_url(image: &RgbaImage) -> Result<String, RecognitionError> {
    encode_png(image).map(|png| png_data_url(&png))
}
