//! URL construction helpers for the Orb API.
//!
//! Pure functions, so every endpoint builds its URL the same way.

use url::Url;

use crate::error::{OrbError, OrbResult};

/// Validate and percent-encode a value substituted into a path template.
pub fn path_param(name: &'static str, value: &str) -> OrbResult<String> {
    if value.trim().is_empty() {
        return Err(OrbError::InvalidParameter {
            name,
            reason: "expected a non-empty value".to_string(),
        });
    }
    Ok(urlencoding::encode(value).into_owned())
}

/// Join `path` onto the base URL and append `query` pairs in order.
pub fn build_endpoint_url(base: &Url, path: &str, query: &[(String, String)]) -> Url {
    let mut url = base.clone();

    let base_path = url.path().trim_end_matches('/').to_string();
    let path = path.trim_start_matches('/');
    url.set_path(&format!("{base_path}/{path}"));

    if query.is_empty() {
        url.set_query(None);
    } else {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (key, value) in query {
            pairs.append_pair(key, value);
        }
    }

    url
}
