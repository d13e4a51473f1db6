use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path: drop `.` segments and redundant separators and fold
/// `name/..` pairs. The filesystem is never touched, so symlinks are not resolved.
pub fn normalize_path(path: &str) -> String {
    let mut parts: Vec<Component> = Vec::new();

    for component in Path::new(path).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return ".".to_string();
    }

    parts
        .iter()
        .collect::<PathBuf>()
        .to_string_lossy()
        .into_owned()
}
