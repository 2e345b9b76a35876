use std::path::Path;
use std::process::Command;

use anyhow::{bail, Context, Result};

/// Extension-keyed overrides applied when the classifier only reports
/// `text/plain` for a file that clearly has a more specific text format.
const TEXT_FORMATS: &[(&str, &str)] = &[
    ("txt", "text/plain"),
    ("html", "text/html"),
    ("htm", "text/html"),
    ("css", "text/css"),
    ("js", "application/javascript"),
    ("json", "application/json"),
    ("xml", "application/xml"),
    ("csv", "text/csv"),
    ("yaml", "text/yaml"),
    ("yml", "text/yaml"),
    ("md", "text/markdown"),
    ("ini", "text/plain"),
    ("log", "text/plain"),
    ("sh", "application/x-sh"),
    ("py", "text/x-python"),
    ("java", "text/x-java-source"),
    ("c", "text/x-c"),
    ("cpp", "text/x-c++"),
    ("h", "text/x-c"),
    ("hpp", "text/x-c++"),
    ("ts", "application/typescript"),
    ("tsx", "text/tsx"),
    ("jsx", "text/jsx"),
    ("php", "application/x-httpd-php"),
    ("rb", "text/x-ruby"),
    ("pl", "text/x-perl"),
    ("go", "text/x-go"),
    ("rs", "text/x-rustsrc"),
    ("swift", "text/x-swift"),
];

/// Resolves the full `type/subtype; charset=...` content type for a file by
/// asking the external `file` classifier, falling back to the extension
/// table when it can only say `text/plain`.
pub fn mime_from_path(path: &Path) -> Result<String> {
    let mut mime_type = classify(path, "--mime-type")?;
    if mime_type == "text/plain" {
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        mime_type = lookup_text_format(extension).to_string();
    }
    let encoding = classify(path, "--mime-encoding")?;
    Ok(format!("{}; charset={}", mime_type, encoding))
}

/// Looks up the MIME type for a text file extension, defaulting to
/// `text/plain`.
pub fn lookup_text_format(extension: &str) -> &'static str {
    TEXT_FORMATS
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| *mime)
        .unwrap_or("text/plain")
}

fn classify(path: &Path, flag: &str) -> Result<String> {
    let output = Command::new("file")
        .arg("-b")
        .arg(flag)
        .arg(path)
        .output()
        .context("running file classifier")?;
    if !output.status.success() {
        bail!(
            "file classifier failed for {}: {}",
            path.display(),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
