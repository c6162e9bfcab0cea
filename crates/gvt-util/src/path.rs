//! Path utilities.
//!
//! Tracked files are identified by their path relative to the working
//! directory, always written with `/` separators so the index reads the same
//! on every platform.

use std::path::{Component, Path, PathBuf};

/// Normalize a path by removing `.` and `..` components.
///
/// Unlike `canonicalize`, this doesn't require the path to exist.
pub fn normalize(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();

    for component in path.components() {
        match component {
            Component::ParentDir => {
                result.pop();
            }
            Component::CurDir => {}
            _ => result.push(component),
        }
    }

    result
}

/// Normalize a relative path, returning `None` if it climbs above its root.
pub fn normalize_relative(path: &Path) -> Option<PathBuf> {
    let mut parts: Vec<&std::ffi::OsStr> = Vec::new();

    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                parts.pop()?;
            }
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    Some(parts.iter().collect())
}

/// Make a path relative to a base directory.
///
/// Returns `None` if the path is not within the base directory.
pub fn relative_to(path: &Path, base: &Path) -> Option<PathBuf> {
    normalize(path)
        .strip_prefix(normalize(base))
        .ok()
        .map(|p| p.to_path_buf())
}

/// Render a relative path with `/` separators.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Resolve a user-supplied path to a name relative to `work_dir`.
///
/// Absolute paths must live under `work_dir`; relative paths must not climb
/// out of it. Returns `None` for anything else, including the directory
/// itself.
pub fn resolve_name(work_dir: &Path, path: &Path) -> Option<String> {
    let relative = if path.is_absolute() {
        relative_to(path, work_dir)?
    } else {
        normalize_relative(path)?
    };

    if relative.as_os_str().is_empty() {
        return None;
    }

    Some(to_slash(&relative))
}
