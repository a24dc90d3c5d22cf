//! File system helpers for writing build files and relating paths.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Safely writes a string to a file using atomic operations.
///
/// Convenience wrapper around [`atomic_write`].
pub fn safe_write(path: &Path, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}

/// Atomically writes bytes to a file using a write-then-rename strategy.
///
/// Content goes to a sibling `.tmp` file which is synced and then renamed over
/// `path`, so readers see either the old file or the new one. Missing parent
/// directories are created.
///
/// ```rust,no_run
/// use gazelle_cli::utils::atomic_write;
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// atomic_write(Path::new("lib/BUILD"), b"go_library(name = \"x\")\n")?;
/// # Ok(())
/// # }
/// ```
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    {
        let mut file = fs::File::create(&temp_path).with_context(|| {
            format!(
                "Failed to create temp file: {}\n\nCheck file permissions and that directory exists",
                temp_path.display()
            )
        })?;

        file.write_all(content)
            .with_context(|| format!("Failed to write to temp file: {}", temp_path.display()))?;

        file.sync_all().with_context(|| "Failed to sync file to disk")?;
    }

    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;

    Ok(())
}

/// Lexically removes `.` and resolves `..` components.
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                components.pop();
            }
            c => components.push(c),
        }
    }

    components.iter().collect()
}

/// The slash-separated path of `dir` relative to `root`, or `None` when
/// `dir` is neither `root` nor one of its descendants.
///
/// Both paths are normalized first. The root itself maps to the empty string.
///
/// ```
/// use gazelle_cli::utils::relative_slash_path;
/// use std::path::Path;
///
/// let root = Path::new("/src/repo");
/// assert_eq!(relative_slash_path(root, Path::new("/src/repo")), Some(String::new()));
/// assert_eq!(relative_slash_path(root, Path::new("/src/repo/a/./b")), Some("a/b".to_string()));
/// assert_eq!(relative_slash_path(root, Path::new("/src/repository")), None);
/// assert_eq!(relative_slash_path(root, Path::new("/src/repo/../other")), None);
/// ```
#[must_use]
pub fn relative_slash_path(root: &Path, dir: &Path) -> Option<String> {
    let root = normalize_path(root);
    let dir = normalize_path(dir);
    let rel = dir.strip_prefix(&root).ok()?;
    let segments: Vec<String> =
        rel.components().map(|c| c.as_os_str().to_string_lossy().into_owned()).collect();
    Some(segments.join("/"))
}
