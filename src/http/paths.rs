/// Maps a filesystem path to the HTTP path it is served under.
///
/// Separators are normalized to `/`, a Windows drive-letter prefix is
/// stripped, a leading `./` or `/.` collapses, surrounding slashes are
/// trimmed and exactly one leading `/` is re-applied. The empty path maps
/// to `/`.
pub fn http_path_for_filepath(filepath: &str) -> String {
    let mut path = filepath.replace('\\', "/");

    let has_drive_prefix = {
        let bytes = path.as_bytes();
        bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
    };
    if has_drive_prefix {
        path.drain(..2);
    }

    let mut trimmed = path.trim_matches('/');
    trimmed = trimmed.strip_prefix("./").unwrap_or(trimmed);
    if trimmed == "." {
        trimmed = "";
    }
    let trimmed = trimmed.trim_matches('/');

    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}")
    }
}
