//! Shareable-link codec.
//!
//! A share token is the JSON payload, raw-deflated and base64 encoded with the
//! URL-safe alphabet. Links carry it as `#d=TOKEN`; older links used a `d=`
//! query parameter, and the oldest carried the JSON as-is.

use crate::constants::{MAX_SHARE_DECODED_BYTES, SHARE_FRAGMENT_MARKER, SHARE_QUERY_KEY};
use crate::planner::PlanOptions;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Write};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SharePayload {
    /// The raw export text.
    pub text: String,
    pub drop_ceiling: Option<u32>,
    pub maximal: bool,
}

impl SharePayload {
    pub fn new(text: impl Into<String>, options: &PlanOptions) -> Self {
        Self {
            text: text.into(),
            drop_ceiling: options.drop_ceiling,
            maximal: options.maximal,
        }
    }

    pub fn options(&self) -> PlanOptions {
        PlanOptions {
            drop_ceiling: self.drop_ceiling,
            maximal: self.maximal,
        }
    }
}

/// Encodes a payload as a `#d=` link fragment.
pub fn encode(payload: &SharePayload) -> io::Result<String> {
    let json = serde_json::to_vec(payload)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(&json)?;
    let compressed = encoder.finish()?;
    Ok(format!(
        "{}{}",
        SHARE_FRAGMENT_MARKER,
        URL_SAFE_NO_PAD.encode(compressed)
    ))
}

/// Decodes a full link, a fragment, a bare token or legacy JSON.
/// Anything unreadable yields `None`.
pub fn decode(input: &str) -> Option<SharePayload> {
    let input = input.trim();
    if input.starts_with('{') {
        return serde_json::from_str(input).ok();
    }

    let token = extract_token(input);
    if token.is_empty() {
        return None;
    }
    let compressed = URL_SAFE_NO_PAD.decode(token.trim_end_matches('=')).ok()?;
    let json = inflate_capped(&compressed)?;
    serde_json::from_slice(&json).ok()
}

fn extract_token(input: &str) -> &str {
    if let Some(pos) = input.find(SHARE_FRAGMENT_MARKER) {
        return &input[pos + SHARE_FRAGMENT_MARKER.len()..];
    }
    for sep in ['?', '&'] {
        let key = format!("{sep}{SHARE_QUERY_KEY}");
        if let Some(pos) = input.find(&key) {
            let rest = &input[pos + key.len()..];
            let end = rest.find(['&', '#']).unwrap_or(rest.len());
            return &rest[..end];
        }
    }
    input
}

fn inflate_capped(compressed: &[u8]) -> Option<Vec<u8>> {
    let mut out = Vec::new();
    DeflateDecoder::new(compressed)
        .take(MAX_SHARE_DECODED_BYTES + 1)
        .read_to_end(&mut out)
        .ok()?;
    if out.len() as u64 > MAX_SHARE_DECODED_BYTES {
        log::debug!("share payload exceeds {} bytes", MAX_SHARE_DECODED_BYTES);
        return None;
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SharePayload {
        SharePayload {
            text: "head=,id=1,bonus_id=12801\n# upgrade_currencies=c:3290:45\n".to_string(),
            drop_ceiling: Some(704),
            maximal: true,
        }
    }

    #[test]
    fn test_encode_has_fragment_prefix() {
        let link = encode(&sample()).unwrap();
        assert!(link.starts_with("#d="));
        assert!(!link.contains('+'));
        assert!(!link.contains('/'));
        assert!(!link.ends_with('='));
    }

    #[test]
    fn test_decode_accepts_link_forms() {
        let link = encode(&sample()).unwrap();
        let token = link.trim_start_matches("#d=");
        let full = format!("https://example.invalid/plan{link}");
        let query = format!("https://example.invalid/plan?d={token}");
        let later_param = format!("https://example.invalid/plan?x=1&d={token}#top");

        for form in [
            link.as_str(),
            token,
            full.as_str(),
            query.as_str(),
            later_param.as_str(),
        ] {
            assert_eq!(decode(form), Some(sample()), "form: {form}");
        }
    }

    #[test]
    fn test_decode_legacy_json() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(decode(&json), Some(sample()));
        assert_eq!(
            decode(r#"{"text":"x"}"#),
            Some(SharePayload {
                text: "x".to_string(),
                ..Default::default()
            })
        );
    }

    #[test]
    fn test_decode_garbage_is_none() {
        assert_eq!(decode(""), None);
        assert_eq!(decode("#d="), None);
        assert_eq!(decode("!!!not base64!!!"), None);
        assert_eq!(decode(&URL_SAFE_NO_PAD.encode(b"not deflate data")), None);
        assert_eq!(decode("{broken json"), None);
    }

    #[test]
    fn test_decode_rejects_oversized_payload() {
        let big = SharePayload {
            text: "a".repeat(MAX_SHARE_DECODED_BYTES as usize + 16),
            ..Default::default()
        };
        let link = encode(&big).unwrap();
        assert_eq!(decode(&link), None);
    }

    #[test]
    fn test_payload_carries_options() {
        let options = PlanOptions {
            drop_ceiling: Some(701),
            maximal: false,
        };
        let payload = SharePayload::new("text", &options);
        assert_eq!(payload.options(), options);
    }
}
