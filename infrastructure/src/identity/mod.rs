//! File-backed client identity
//!
//! The id lives in a one-line file under the user's data directory
//! (`<data_dir>/yara/client_id`). It is generated on first use and read back
//! on every later run.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use yara_application::{IdentityError, IdentityProvider};
use yara_domain::ClientId;

/// Identity provider backed by a file on disk.
pub struct FileIdentityProvider {
    path: PathBuf,
    override_id: Option<String>,
}

impl FileIdentityProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            override_id: None,
        }
    }

    /// Provider at the default location, if the platform has a data directory.
    pub fn at_default_location() -> Option<Self> {
        Self::default_path().map(Self::new)
    }

    /// Always answer with this id instead of the stored one.
    pub fn with_override(mut self, client_id: Option<String>) -> Self {
        self.override_id = client_id;
        self
    }

    /// `<data_dir>/yara/client_id`
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("yara").join("client_id"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_stored(&self) -> Result<Option<ClientId>, IdentityError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(IdentityError::Storage(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        if raw.trim().is_empty() {
            return Ok(None);
        }
        match ClientId::parse(&raw) {
            Ok(id) => Ok(Some(id)),
            Err(e) => {
                warn!(
                    "Ignoring unreadable client id in {}: {}",
                    self.path.display(),
                    e
                );
                Ok(None)
            }
        }
    }

    fn store(&self, client_id: &ClientId) -> Result<(), IdentityError> {
        let storage_error =
            |e: std::io::Error| IdentityError::Storage(format!("{}: {}", self.path.display(), e));

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(storage_error)?;
        }
        std::fs::write(&self.path, format!("{}\n", client_id)).map_err(storage_error)
    }
}

impl IdentityProvider for FileIdentityProvider {
    fn client_id(&self) -> Result<ClientId, IdentityError> {
        if let Some(raw) = &self.override_id {
            return Ok(ClientId::parse(raw)?);
        }

        if let Some(id) = self.read_stored()? {
            return Ok(id);
        }

        let id = ClientId::generate();
        self.store(&id)?;
        info!("Generated new client id at {}", self.path.display());
        Ok(id)
    }
}
