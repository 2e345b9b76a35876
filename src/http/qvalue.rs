use anyhow::{anyhow, bail, Result};

/// Parses an `Accept-*` style header value into (token, q-value) pairs,
/// preserved in the order they were scanned.
///
/// Entries are comma-separated `token[;q=<float>]`; a missing quality
/// defaults to 1.0. An entry whose quality parameter does not parse fails
/// the whole header. Scan order matters: callers break q-value ties in
/// favor of the first-scanned token.
pub fn parse_qvalues(value: &str) -> Result<Vec<(String, f64)>> {
    let mut weights = Vec::new();
    for entry in value.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        match entry.split_once(';') {
            None => {
                weights.push((entry.to_string(), 1.0));
            }
            Some((token, params)) => {
                let params = params.trim();
                let q = match params.strip_prefix("q=") {
                    Some(q) => q,
                    None => bail!("malformed quality parameter: {params}"),
                };
                let q: f64 =
                    q.trim().parse().map_err(|_| anyhow!("malformed q-value: {q}"))?;
                weights.push((token.trim().to_string(), q));
            }
        }
    }
    Ok(weights)
}
