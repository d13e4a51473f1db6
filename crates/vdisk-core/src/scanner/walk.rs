use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};
use tracing::{error, warn};
use walkdir::{DirEntry, WalkDir};

/// Extensions recognized as disk images, in the order their matches are returned.
/// Matching is case-sensitive: `disk.QCOW2` is not a candidate.
pub const DISK_EXTENSIONS: [&str; 2] = ["qcow2", "raw"];

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Recursively collect candidate disk files under `root`.
///
/// Results are grouped by extension (every `.qcow2` before any `.raw`); within a
/// group the order is whatever the filesystem returns. Hidden entries and paths
/// matching `ignore_globs` are skipped, as are entries that cannot be read.
pub fn find_disk_candidates(root: &Path, ignore_globs: &[String]) -> Vec<PathBuf> {
    let ignore_patterns = compile_patterns(ignore_globs);
    let name_patterns: Vec<Pattern> = DISK_EXTENSIONS
        .iter()
        .filter_map(|ext| Pattern::new(&format!("*.{}", ext)).ok())
        .collect();

    let mut groups: Vec<Vec<PathBuf>> = vec![Vec::new(); name_patterns.len()];

    let walker = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_ignored(entry, &ignore_patterns));

    for entry_result in walker {
        let entry = match entry_result {
            Ok(entry) => entry,
            Err(err) => {
                // A dangling link still counts as found; qemu-img rejects it later.
                if let Some(path) = dangling_link(&err, &ignore_patterns) {
                    if let Some(group) = name_group(&path, &name_patterns) {
                        groups[group].push(path);
                        continue;
                    }
                }
                warn!("Skipping unreadable entry under {}: {}", root.display(), err);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        if let Some(group) = name_group(entry.path(), &name_patterns) {
            groups[group].push(entry.into_path());
        }
    }

    groups.into_iter().flatten().collect()
}

fn name_group(path: &Path, name_patterns: &[Pattern]) -> Option<usize> {
    let file_name = path.file_name()?.to_string_lossy();
    name_patterns
        .iter()
        .position(|pattern| pattern.matches_with(&file_name, MATCH_OPTIONS))
}

fn dangling_link(err: &walkdir::Error, ignore_patterns: &[Pattern]) -> Option<PathBuf> {
    let path = err.path()?;
    if err.depth() == 0 || path.exists() {
        return None;
    }
    let is_link = path
        .symlink_metadata()
        .map(|meta| meta.file_type().is_symlink())
        .unwrap_or(false);
    let ignored = ignore_patterns
        .iter()
        .any(|pattern| pattern.matches_path(path));

    (is_link && !ignored).then(|| path.to_path_buf())
}

fn compile_patterns(globs: &[String]) -> Vec<Pattern> {
    globs
        .iter()
        .filter_map(|glob| match Pattern::new(glob) {
            Ok(p) => Some(p),
            Err(e) => {
                error!("Invalid glob pattern '{}': {}", glob, e);
                None
            }
        })
        .collect()
}

fn is_ignored(entry: &DirEntry, ignore_patterns: &[Pattern]) -> bool {
    let hidden = entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false);

    hidden
        || ignore_patterns
            .iter()
            .any(|pattern| pattern.matches_path(entry.path()))
}
