use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Lists every file below `directory`, as paths relative to it.
pub fn list_files_recursive(directory: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    walk(directory, directory, true, &mut entries)?;
    Ok(entries)
}

/// Lists every directory below `directory` (the directory itself included,
/// as `.`), as paths relative to it.
pub fn list_dirs_recursive(directory: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    walk(directory, directory, false, &mut entries)?;
    Ok(entries)
}

fn walk(root: &Path, dir: &Path, list_files: bool, out: &mut Vec<PathBuf>) -> Result<()> {
    if !list_files {
        let rel = dir.strip_prefix(root).unwrap_or(dir);
        if rel.as_os_str().is_empty() {
            out.push(PathBuf::from("."));
        } else {
            out.push(rel.to_path_buf());
        }
    }
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("reading directory {}", dir.display()))?;
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            walk(root, &path, list_files, out)?;
        } else if list_files {
            let rel = path.strip_prefix(root).unwrap_or(&path);
            out.push(rel.to_path_buf());
        }
    }
    Ok(())
}

/// Names of the files directly inside `directory`, sorted.
pub fn files_in_directory(directory: &Path) -> Result<Vec<String>> {
    entries_in_directory(directory, true)
}

/// Names of the directories directly inside `directory`, sorted.
pub fn dirs_in_directory(directory: &Path) -> Result<Vec<String>> {
    entries_in_directory(directory, false)
}

fn entries_in_directory(directory: &Path, list_files: bool) -> Result<Vec<String>> {
    let entries = std::fs::read_dir(directory)
        .with_context(|| format!("reading directory {}", directory.display()))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry?;
        let is_dir = entry.file_type()?.is_dir();
        if list_files != is_dir {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}
