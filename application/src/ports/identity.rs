//! Identity provider port

use thiserror::Error;
use yara_domain::{ClientId, DomainError};

/// Errors that can occur while producing the client identity
#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("Identity storage error: {0}")]
    Storage(String),

    #[error("Stored identity is invalid: {0}")]
    Invalid(#[from] DomainError),
}

/// Produces the stable identifier of this installation
///
/// The first call may generate and persist a new id; every later call
/// (in this or any future process) must return the same one.
pub trait IdentityProvider: Send + Sync {
    fn client_id(&self) -> Result<ClientId, IdentityError>;
}

/// Provider that always returns a fixed id.
pub struct FixedIdentity(pub ClientId);

impl IdentityProvider for FixedIdentity {
    fn client_id(&self) -> Result<ClientId, IdentityError> {
        Ok(self.0.clone())
    }
}
