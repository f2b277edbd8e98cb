//! Where a document comes from and how updated text goes back to it.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{TocError, TocResult};

const MARKDOWN_EXTENSION: &str = "md";
const BACKUP_EXTENSION: &str = "bak";

#[derive(Debug, Clone)]
pub enum DocumentSource {
    File(PathBuf),
    Stdin,
}

impl DocumentSource {
    /// Name used in logs, errors and diff headers.
    pub fn label(&self) -> String {
        match self {
            DocumentSource::File(path) => path.display().to_string(),
            DocumentSource::Stdin => "<stdin>".to_string(),
        }
    }

    /// Reads the whole document, rejecting non-`.md` files and empty buffers.
    pub fn read(&self) -> TocResult<String> {
        let content = match self {
            DocumentSource::File(path) => {
                ensure_markdown(path)?;
                fs::read_to_string(path)?
            }
            DocumentSource::Stdin => {
                let mut buffer = String::new();
                io::stdin().read_to_string(&mut buffer)?;
                buffer
            }
        };

        if content.is_empty() {
            return Err(TocError::EmptyDocument {
                origin: self.label(),
            });
        }

        Ok(content)
    }

    /// Replaces a file document with `content` in one rename.
    ///
    /// Returns `false` for stdin, whose output belongs to the caller.
    pub fn write_back(&self, content: &str, backup: bool) -> TocResult<bool> {
        match self {
            DocumentSource::File(path) => {
                replace_file(path, content, backup)?;
                Ok(true)
            }
            DocumentSource::Stdin => Ok(false),
        }
    }
}

/// `notes.md` is backed up as `notes.bak`.
pub fn backup_path(path: &Path) -> PathBuf {
    path.with_extension(BACKUP_EXTENSION)
}

fn replace_file(path: &Path, content: &str, backup: bool) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // Dropping the staged file on an early return deletes it.
    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(content.as_bytes())?;
    staged.as_file().sync_all()?;

    if backup {
        let previous = backup_path(path);
        fs::copy(path, &previous)?;
        log::debug!("kept previous version as {}", previous.display());
    }

    staged.persist(path).map_err(|err| err.error)?;
    Ok(())
}

fn ensure_markdown(path: &Path) -> TocResult<()> {
    let is_markdown = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == MARKDOWN_EXTENSION);

    if is_markdown {
        Ok(())
    } else {
        Err(TocError::NotMarkdown {
            path: path.to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn only_md_extension_is_markdown() {
        assert!(ensure_markdown(Path::new("notes.md")).is_ok());
        assert!(ensure_markdown(Path::new("notes.markdown")).is_err());
        assert!(ensure_markdown(Path::new("notes.MD")).is_err());
        assert!(ensure_markdown(Path::new("notes")).is_err());
    }

    #[test]
    fn write_back_keeps_previous_version() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.md");
        fs::write(&path, "# Old\n").unwrap();

        let source = DocumentSource::File(path.clone());
        assert!(source.write_back("# New\n", true).unwrap());

        assert_eq!(source.read().unwrap(), "# New\n");
        assert_eq!(fs::read_to_string(backup_path(&path)).unwrap(), "# Old\n");
    }

    #[test]
    fn write_back_leaves_only_the_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.md");
        fs::write(&path, "# Old\n").unwrap();

        DocumentSource::File(path.clone())
            .write_back("# New\n", false)
            .unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("notes.md")]);
    }

    #[test]
    fn failed_backup_leaves_document_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.md");
        fs::write(&path, "# Old\n").unwrap();
        fs::create_dir(backup_path(&path)).unwrap();

        let source = DocumentSource::File(path.clone());
        assert!(source.write_back("# New\n", true).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "# Old\n");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn stdin_is_never_written() {
        assert!(!DocumentSource::Stdin.write_back("# New\n", true).unwrap());
    }

    #[test]
    fn empty_file_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.md");
        fs::write(&path, "").unwrap();

        let err = DocumentSource::File(path).read().unwrap_err();
        assert!(matches!(err, TocError::EmptyDocument { .. }));
    }
}
