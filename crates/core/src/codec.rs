//! Byte Channel Codec
//!
//! The page context can only hand structured, string-like values back to the
//! host. Binary bodies are therefore carried as a `TransportString`: every
//! byte value 0..=255 becomes exactly one UTF-16 code unit of the same value
//! (the Latin-1 block). A text encoding such as UTF-8 would mangle bytes that
//! do not form valid sequences; this mapping is lossless for all input.
//!
//! The same mapping is implemented on the page side by [`PAGE_ENCODER_JS`],
//! so a body encoded in the browser decodes byte-for-byte on the host.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// JavaScript function source that encodes an `ArrayBuffer` the same way
/// [`encode`] encodes a byte slice. Chunked so `String.fromCharCode.apply`
/// stays under engine argument limits.
pub const PAGE_ENCODER_JS: &str = r#"function (buffer) {
    const view = new Uint8Array(buffer);
    const chunk = 0x8000;
    let out = '';
    for (let i = 0; i < view.length; i += chunk) {
        out += String.fromCharCode.apply(null, view.subarray(i, i + chunk));
    }
    return out;
}"#;

/// String-shaped encoding of a binary payload.
///
/// Invariant: every `char` is in `U+0000..=U+00FF` when built through
/// [`encode`]. Values received from the page are checked on [`decode`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransportString(String);

impl TransportString {
    /// Wrap a string received from the page context without checking it.
    pub fn from_wire(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Number of characters. For an encoded payload this is the byte count.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Encode bytes into a transport string, one code unit per byte.
pub fn encode(bytes: &[u8]) -> TransportString {
    TransportString(bytes.iter().map(|&b| char::from(b)).collect())
}

/// Decode a transport string back into bytes.
///
/// Fails if any code unit is above 0xFF, which means the payload was not
/// produced by this encoding.
pub fn decode(text: &TransportString) -> CoreResult<Vec<u8>> {
    let mut bytes = Vec::with_capacity(text.0.len());
    for (offset, ch) in text.0.chars().enumerate() {
        let unit = u32::from(ch);
        let byte = u8::try_from(unit).map_err(|_| {
            CoreError::decode(format!("code unit 0x{:x} at offset {} is not a byte", unit, offset))
        })?;
        bytes.push(byte);
    }
    Ok(bytes)
}
