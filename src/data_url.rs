//! `data:` URL encoding for imported images

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};
use percent_encoding::percent_decode_str;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Build a base64 data URL
pub fn encode(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", BASE64_STANDARD.encode(bytes))
}

pub fn is_data_url(url: &str) -> bool {
    url.starts_with("data:")
}

/// Split a data URL into MIME type and payload.
/// Handles both base64 and percent-encoded payloads.
pub fn decode(url: &str) -> Option<DataUrl> {
    let rest = url.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;

    let mut params = header.split(';');
    let mime = match params.next() {
        Some("") | None => "text/plain".to_string(),
        Some(mime) => mime.to_ascii_lowercase(),
    };
    let is_base64 = params.any(|p| p.eq_ignore_ascii_case("base64"));

    let bytes = if is_base64 {
        BASE64_STANDARD.decode(payload.trim()).ok()?
    } else {
        // Malformed escapes such as `%zz` pass through literally
        percent_decode_str(payload).collect()
    };

    Some(DataUrl { mime, bytes })
}
