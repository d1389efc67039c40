//! Self-contained `data:` URIs for image previews.
//!
//! The preview of an uploaded file is its bytes wrapped as
//! `data:<media-type>;base64,<payload>`. The same string is rendered
//! directly as an `<img src>` and decoded back into bytes when a
//! conversion starts.

use std::fmt;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Errors from parsing a data URI.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataUriError {
    /// The string does not start with `data:`.
    #[error("not a data URI")]
    MissingScheme,

    /// No `,` separates the header from the payload.
    #[error("data URI has no payload separator")]
    MissingPayload,

    /// The header does not declare `;base64`.
    #[error("data URI payload is not base64 encoded")]
    NotBase64,

    /// The payload is not valid base64.
    #[error("invalid base64 payload: {0}")]
    InvalidPayload(String),
}

/// A base64 `data:` URI.
///
/// Cheap to clone: the text is shared.
#[derive(Clone, PartialEq, Eq)]
pub struct DataUri(Arc<str>);

impl DataUri {
    /// Encode `bytes` as a data URI with the given media type.
    #[must_use]
    pub fn encode(media_type: &str, bytes: &[u8]) -> Self {
        let payload = STANDARD.encode(bytes);
        Self(format!("data:{media_type};base64,{payload}").into())
    }

    /// Wrap an existing data URI string after checking its shape.
    ///
    /// # Errors
    ///
    /// Returns a [`DataUriError`] if the header is malformed. The
    /// payload itself is only validated by [`decode`](Self::decode).
    pub fn parse(uri: impl Into<String>) -> Result<Self, DataUriError> {
        let uri = uri.into();
        split(&uri)?;
        Ok(Self(uri.into()))
    }

    /// The declared media type (may be empty).
    #[must_use]
    pub fn media_type(&self) -> &str {
        split(&self.0).map_or("", |(media_type, _)| media_type)
    }

    /// Decode the payload back into raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`DataUriError::InvalidPayload`] if the payload is not
    /// valid base64.
    pub fn decode(&self) -> Result<Vec<u8>, DataUriError> {
        let (_, payload) = split(&self.0)?;
        STANDARD
            .decode(payload)
            .map_err(|e| DataUriError::InvalidPayload(e.to_string()))
    }

    /// The full URI, suitable for an `src` attribute.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length of the URI in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the URI text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for DataUri {
    // Previews run to megabytes; keep debug output readable.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataUri")
            .field("media_type", &self.media_type())
            .field("len", &self.0.len())
            .finish()
    }
}

/// Split a data URI into `(media_type, base64_payload)`.
fn split(uri: &str) -> Result<(&str, &str), DataUriError> {
    let rest = uri
        .get(..5)
        .filter(|scheme| scheme.eq_ignore_ascii_case("data:"))
        .map(|_| &uri[5..])
        .ok_or(DataUriError::MissingScheme)?;
    let (header, payload) = rest.split_once(',').ok_or(DataUriError::MissingPayload)?;
    let media_type = header
        .strip_suffix(";base64")
        .ok_or(DataUriError::NotBase64)?;
    Ok((media_type, payload))
}
