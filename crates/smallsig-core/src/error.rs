//! Error types for smallsig-core.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("duplicate component reference: {0}")]
    DuplicateReference(String),
}

pub type Result<T> = std::result::Result<T, Error>;
