//! Error types for schema encoding and decoding

use thiserror::Error;

/// Errors that can occur while encoding or decoding a schema.
///
/// Every variant is terminal for the call that produced it: a failed decode
/// never yields a partial schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Malformed JSON, or a JSON value of the wrong shape
    #[error("avroschema: {0}")]
    Json(#[from] serde_json::Error),
    /// `logicalType` names a logical type this crate does not model
    #[error("avroschema: unknown logical type {0}")]
    UnknownLogicalType(String),
    /// `type` names something other than a complex type
    #[error("avroschema: unknown complex type {0}")]
    UnknownComplexType(String),
    /// Input does not start like any schema encoding
    #[error("avroschema: could not parse {0} as Schema")]
    Unrecognized(String),
    /// A recognized schema object is missing or misusing an attribute
    #[error("avroschema: invalid schema: {0}")]
    InvalidSchema(String),
    /// The decoded schema is not the variant the caller asked for
    #[error("avroschema: expected {expected} schema, found {found}")]
    TypeMismatch { expected: String, found: String },
    /// Schema nesting is deeper than the parser allows
    #[error("avroschema: schema nesting exceeds maximum depth of {0}")]
    DepthLimitExceeded(usize),
}

impl SchemaError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SchemaError::InvalidSchema(msg.into())
    }
}
