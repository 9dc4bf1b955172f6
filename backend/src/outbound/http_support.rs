//! Helpers shared by the reqwest-backed clients.

use reqwest::Url;

const PREVIEW_CHAR_LIMIT: usize = 160;

/// Failure to construct an HTTP client adapter.
#[derive(Debug, thiserror::Error)]
pub enum HttpClientError {
    /// The configured base URL cannot carry a path.
    #[error("endpoint base {0} cannot carry a path")]
    InvalidEndpoint(Url),
    /// reqwest could not build the client.
    #[error("failed to build http client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Collapse whitespace and truncate `body` to a short single-line preview.
pub(crate) fn body_preview(body: &[u8]) -> String {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

/// `status 502` or `status 502: <preview>`.
pub(crate) fn status_message(status: u16, body: &[u8]) -> String {
    let preview = body_preview(body);
    if preview.is_empty() {
        format!("status {status}")
    } else {
        format!("status {status}: {preview}")
    }
}

/// Append `segment` to the path of `base`, keeping any existing prefix.
///
/// URLs that cannot carry a path, such as `mailto:`, are rejected.
pub(crate) fn endpoint(base: &Url, segment: &str) -> Result<Url, HttpClientError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| HttpClientError::InvalidEndpoint(base.clone()))?
        .pop_if_empty()
        .push(segment);
    Ok(url)
}
