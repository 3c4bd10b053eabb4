use log::{info, warn};
use std::collections::HashSet;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StateError {
    #[error("Error loading codes: {0}")]
    IO(#[from] std::io::Error),
    #[error("Error decoding codes: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Error encoding codes: {0}")]
    Encode(serde_json::Error),
    #[error("Error writing codes: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Codes of every article that was already announced (or seen on the first run).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct KnownCodes {
    codes: HashSet<String>,
}

impl KnownCodes {
    pub fn load(path: &Path) -> Result<Self, StateError> {
        let data = match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                warn!("File {:?} does not exist", path);
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };

        let codes: Vec<String> = serde_json::from_str(&data)?;
        let known: Self = codes.into_iter().collect();
        info!("Got {} codes from {:?}", known.len(), path);
        Ok(known)
    }

    /// Replaces the file at `path` in one rename, so a crash never leaves half a list behind.
    pub fn save(&self, path: &Path) -> Result<(), StateError> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let mut codes: Vec<&str> = self.codes.iter().map(String::as_str).collect();
        codes.sort_unstable();

        let mut file = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut file, &codes).map_err(StateError::Encode)?;
        file.write_all(b"\n")?;
        file.as_file().sync_all()?;
        file.persist(path)?;

        info!("Codes ({}) were written to {:?}", codes.len(), path);
        Ok(())
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    pub fn insert(&mut self, code: &str) -> bool {
        self.codes.insert(code.to_owned())
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl FromIterator<String> for KnownCodes {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            codes: iter.into_iter().collect(),
        }
    }
}

impl<'a> Extend<&'a str> for KnownCodes {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, iter: I) {
        self.codes.extend(iter.into_iter().map(str::to_owned));
    }
}
