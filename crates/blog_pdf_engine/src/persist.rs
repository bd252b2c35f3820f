use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("{} exists and is not a directory", path.display())]
    NotADirectory { path: PathBuf },
    #[error("cannot create {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot list {}: {source}", path.display())]
    List {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The directory every artifact lands in. Artifact names are plain file names
/// relative to it.
#[derive(Debug, Clone)]
pub struct OutputDir {
    root: PathBuf,
}

impl OutputDir {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Create the directory if needed and check that files can be made in it.
    pub fn prepare(&self) -> Result<(), PersistError> {
        match fs::metadata(&self.root) {
            Ok(meta) if !meta.is_dir() => {
                return Err(PersistError::NotADirectory {
                    path: self.root.clone(),
                })
            }
            Ok(_) => {}
            Err(_) => fs::create_dir_all(&self.root).map_err(|source| PersistError::Create {
                path: self.root.clone(),
                source,
            })?,
        }
        NamedTempFile::new_in(&self.root).map_err(|source| PersistError::Write {
            path: self.root.clone(),
            source,
        })?;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.path_of(name).exists()
    }

    /// Stage `content` in a temp file beside the target, then rename it into
    /// place. An existing file of the same name is replaced.
    pub fn write_atomic(&self, name: &str, content: &[u8]) -> Result<PathBuf, PersistError> {
        let target = self.path_of(name);
        let write_err = |source| PersistError::Write {
            path: target.clone(),
            source,
        };

        let mut staged = NamedTempFile::new_in(&self.root).map_err(write_err)?;
        staged.write_all(content).map_err(write_err)?;
        staged.as_file().sync_all().map_err(write_err)?;
        staged
            .persist(&target)
            .map_err(|err| write_err(err.error))?;
        Ok(target)
    }

    /// Regular files whose extension matches `extension` exactly.
    pub fn count_with_extension(&self, extension: &str) -> Result<usize, PersistError> {
        let entries = fs::read_dir(&self.root).map_err(|source| PersistError::List {
            path: self.root.clone(),
            source,
        })?;
        Ok(entries
            .flatten()
            .filter(|entry| entry.file_type().is_ok_and(|kind| kind.is_file()))
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == extension))
            .count())
    }
}
