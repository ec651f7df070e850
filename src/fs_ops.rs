use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use tempfile::NamedTempFile;
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// A source file read fully into memory.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path relative to the project root, `/`-separated.
    pub relative: String,
    /// Extension without the dot, empty when the file has none.
    pub file_type: String,
    pub content: String,
}

impl SourceFile {
    pub fn read(root: &Path, path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

        Ok(Self {
            relative: relative_path(root, path),
            file_type: file_type(path),
            content,
        })
    }

    pub fn lines(&self) -> Vec<&str> {
        self.content.lines().collect()
    }
}

pub struct FileSystemOps;

impl FileSystemOps {
    /// List files under `dirs` whose extension is one of `extensions`.
    ///
    /// Directories that do not exist are skipped. Entries are visited in
    /// file-name order so repeated runs see the same sequence.
    pub fn list_files(dirs: &[PathBuf], extensions: &[String]) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for dir in dirs {
            if !dir.is_dir() {
                tracing::debug!("skipping missing directory {}", dir.display());
                continue;
            }

            for entry in WalkDir::new(dir)
                .follow_links(false)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| match e {
                    Ok(entry) => Some(entry),
                    Err(err) => {
                        tracing::warn!("failed to walk {}: {}", dir.display(), err);
                        None
                    }
                })
            {
                if !entry.file_type().is_file() {
                    continue;
                }

                let path = entry.path();
                if has_extension(path, extensions) {
                    files.push(path.to_path_buf());
                }
            }
        }

        files
    }

    /// Replace `target` with `bytes` through a temporary file in the same
    /// directory, creating parent directories as needed.
    pub fn write_atomic(target: &Path, bytes: &[u8]) -> Result<()> {
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;

        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| Error::io(&dir, e))?;
        tmp.write_all(bytes).map_err(|e| Error::io(tmp.path(), e))?;

        let permissions = fs::metadata(target)
            .map(|existing| existing.permissions())
            .ok()
            .or_else(default_permissions);
        if let Some(permissions) = permissions {
            tmp.as_file()
                .set_permissions(permissions)
                .map_err(|e| Error::io(tmp.path(), e))?;
        }

        tmp.persist(target).map_err(|e| Error::io(target, e.error))?;

        Ok(())
    }
}

/// Temp files start owner-only; new wiki files are readable by everyone.
#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;

    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy();
            extensions.iter().any(|wanted| wanted.as_str() == ext)
        })
        .unwrap_or(false)
}

pub fn file_type(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_default()
}

pub fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
