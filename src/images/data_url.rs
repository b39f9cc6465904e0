use base64::Engine;
use base64::prelude::BASE64_STANDARD;

/// Decoded `data:` URL payload.
pub(crate) struct DataUrl {
    pub(crate) mime: String,
    pub(crate) bytes: Vec<u8>,
}

/// Decode a base64 `data:<mime>;base64,<payload>` URL. Non-base64 and
/// malformed URLs yield `None`.
pub(crate) fn decode_data_url(url: &str) -> Option<DataUrl> {
    let rest = url.trim().strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let mut params = header.split(';');
    let mime = params.next()?.trim().to_ascii_lowercase();
    if !params.any(|p| p.trim().eq_ignore_ascii_case("base64")) {
        return None;
    }
    let cleaned: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = BASE64_STANDARD.decode(cleaned.as_bytes()).ok()?;
    Some(DataUrl { mime, bytes })
}
