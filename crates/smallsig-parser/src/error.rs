//! Error types for smallsig-parser.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("line {line}: unknown component type '{reference}'")]
    UnknownComponentType { line: usize, reference: String },

    #[error("line {line}: duplicate component reference '{reference}'")]
    DuplicateReference { line: usize, reference: String },

    #[error("line {line}: missing argument for '{reference}'")]
    MissingArgument { line: usize, reference: String },

    #[error("line {line}: invalid value '{value}'")]
    InvalidValue { line: usize, value: String },

    #[error("line {line}: invalid node label '{value}'")]
    InvalidNode { line: usize, value: String },

    #[error("line {line}: {message}")]
    InvalidCommand { line: usize, message: String },

    #[error("line {line}: malformed netlist line")]
    MalformedLine { line: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
