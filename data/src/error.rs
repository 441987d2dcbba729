use super::*;
use thiserror::Error;

/// The error type for the schema-driven CBOR entry points.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] schema::Error),

    #[error(transparent)]
    Codec(#[from] codec::Error),
}
