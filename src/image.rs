//! メニュー写真の読み込み
//!
//! 大きすぎる写真は長辺 max_size まで縮小してJPEGで送る。

use crate::error::{MenuWizardError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::ImageReader;
use menu_wizard_common::ImagePayload;
use std::io::Cursor;
use std::path::Path;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];
const JPEG_QUALITY: u8 = 85;

/// 拡張子からMIMEタイプ
pub fn mime_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_string_lossy().to_lowercase();
    if !IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        return None;
    }
    Some(match ext.as_str() {
        "png" => "image/png",
        "webp" => "image/webp",
        _ => "image/jpeg",
    })
}

/// 画像ファイルを読み込んでBase64化
pub fn load_image(path: &Path, max_size: u32) -> Result<ImagePayload> {
    if !path.exists() {
        return Err(MenuWizardError::FileNotFound(path.display().to_string()));
    }
    let mime_type = mime_type_for(path)
        .ok_or_else(|| MenuWizardError::UnsupportedImage(path.display().to_string()))?;

    let bytes = std::fs::read(path)?;
    let (mime_type, bytes) = shrink_if_needed(mime_type, bytes, max_size)?;

    tracing::debug!(path = %path.display(), mime_type, bytes = bytes.len(), "image loaded");
    Ok(ImagePayload::new(mime_type, STANDARD.encode(&bytes)))
}

fn shrink_if_needed(
    mime_type: &'static str,
    bytes: Vec<u8>,
    max_size: u32,
) -> Result<(&'static str, Vec<u8>)> {
    let image = ImageReader::new(Cursor::new(&bytes))
        .with_guessed_format()?
        .decode()
        .map_err(|e| MenuWizardError::ImageLoad(e.to_string()))?;

    if max_size == 0 || (image.width() <= max_size && image.height() <= max_size) {
        return Ok((mime_type, bytes));
    }

    let resized = image.thumbnail(max_size, max_size).to_rgb8();
    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY)
        .encode_image(&resized)
        .map_err(|e| MenuWizardError::ImageLoad(e.to_string()))?;
    Ok(("image/jpeg", out))
}
