use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::ImageFormat;

use super::error::DataUrlError;

pub const FALLBACK_MIME: &str = "application/octet-stream";

const PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64";

fn mime_for(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Png => "image/png",
        ImageFormat::Jpeg => "image/jpeg",
        ImageFormat::Gif => "image/gif",
        ImageFormat::WebP => "image/webp",
        ImageFormat::Bmp => "image/bmp",
        ImageFormat::Tiff => "image/tiff",
        ImageFormat::Ico => "image/x-icon",
        ImageFormat::Avif => "image/avif",
        _ => FALLBACK_MIME,
    }
}

/// MIME type for file contents: magic bytes first, then the file extension
pub fn sniff_mime(bytes: &[u8], path: Option<&Path>) -> &'static str {
    image::guess_format(bytes)
        .ok()
        .or_else(|| path.and_then(|p| ImageFormat::from_path(p).ok()))
        .map(mime_for)
        .unwrap_or(FALLBACK_MIME)
}

pub fn is_data_url(url: &str) -> bool {
    url.starts_with(PREFIX)
}

pub fn encode_data_url(bytes: &[u8], mime: &str) -> String {
    format!("{PREFIX}{mime}{BASE64_MARKER},{}", STANDARD.encode(bytes))
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedDataUrl {
    pub mime: String,
    pub bytes: Vec<u8>,
}

pub fn decode_data_url(url: &str) -> Result<DecodedDataUrl, DataUrlError> {
    let rest = url.strip_prefix(PREFIX).ok_or(DataUrlError::NotDataUrl)?;
    let (header, payload) = rest.split_once(',').ok_or(DataUrlError::MissingPayload)?;
    let mime = header
        .strip_suffix(BASE64_MARKER)
        .ok_or(DataUrlError::NotBase64)?;

    Ok(DecodedDataUrl {
        mime: mime.to_string(),
        bytes: STANDARD.decode(payload)?,
    })
}
