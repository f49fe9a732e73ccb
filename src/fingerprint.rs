//! Request fingerprinting for deterministic identity hashes

use sha2::{Digest, Sha256};

use crate::message::Request;

/// Compute SHA-256 fingerprint of a request
///
/// The fingerprint includes:
/// 1. Method (uppercase normalized)
/// 2. Path
/// 3. Query parameters (decoded, sorted)
/// 4. Headers (sorted, names lowercased, values trimmed)
/// 5. Body
///
/// Scheme, host and port are not part of the fingerprint.
#[must_use]
pub fn fingerprint_request(request: &Request) -> [u8; 32] {
    let mut hasher = Sha256::new();

    // 1. Method
    let method = request.method.to_uppercase();
    hasher.update((method.len() as u32).to_le_bytes());
    hasher.update(method.as_bytes());

    // 2. Path (the raw URL when it does not parse)
    let path = request.path().unwrap_or_else(|| request.url.clone());
    hasher.update((path.len() as u32).to_le_bytes());
    hasher.update(path.as_bytes());

    // 3. Query parameters
    let mut query = request.query_pairs().unwrap_or_default();
    query.sort();
    hasher.update((query.len() as u32).to_le_bytes());
    for (key, value) in &query {
        hasher.update((key.len() as u32).to_le_bytes());
        hasher.update(key.as_bytes());
        hasher.update((value.len() as u32).to_le_bytes());
        hasher.update(value.as_bytes());
    }

    // 4. Headers
    let mut headers: Vec<(String, &str)> = request
        .headers
        .iter()
        .map(|(name, value)| (name.to_lowercase(), value.trim()))
        .collect();
    headers.sort_unstable();
    hasher.update((headers.len() as u32).to_le_bytes());
    for (name, value) in &headers {
        hasher.update((name.len() as u32).to_le_bytes());
        hasher.update(name.as_bytes());
        hasher.update((value.len() as u32).to_le_bytes());
        hasher.update(value.as_bytes());
    }

    // 5. Body
    let body = request.body.as_deref().unwrap_or_default();
    hasher.update((body.len() as u32).to_le_bytes());
    hasher.update(body);

    hasher.finalize().into()
}

/// Short hex id of a request, for log lines
#[must_use]
pub fn short_id(request: &Request) -> String {
    hex::encode(&fingerprint_request(request)[..8])
}
