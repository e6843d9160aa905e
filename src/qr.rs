use image::{ImageFormat, Luma};
use qrcode::QrCode;
use std::io::Cursor;
use thiserror::Error;

pub const MAX_HASH_LEN: usize = 256;

#[derive(Debug, Error)]
pub enum QrError {
    #[error("hash must be 1 to {} characters of letters, digits, '-' or '_'", MAX_HASH_LEN)]
    InvalidHash,

    #[error("QR encoding failed: {0}")]
    Encode(#[from] qrcode::types::QrError),

    #[error("PNG encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

pub fn validate_hash(hash: &str) -> Result<(), QrError> {
    let valid = !hash.is_empty()
        && hash.len() <= MAX_HASH_LEN
        && hash.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(QrError::InvalidHash)
    }
}

/// Payload a voucher QR code carries: the verify URL when a public base URL
/// is configured, else the bare hash.
pub fn voucher_payload(hash: &str, public_base_url: Option<&str>) -> String {
    match public_base_url {
        Some(base) => format!("{}/verify/{}", base.trim_end_matches('/'), hash),
        None => hash.to_string(),
    }
}

/// PNG bytes of a QR code for `hash`.
pub fn render_png(hash: &str, public_base_url: Option<&str>) -> Result<Vec<u8>, QrError> {
    validate_hash(hash)?;
    let code = QrCode::new(voucher_payload(hash, public_base_url).as_bytes())?;
    let image = code
        .render::<Luma<u8>>()
        .min_dimensions(256, 256)
        .quiet_zone(true)
        .build();

    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}
