//! Avro schema types, encoding, decoding and comparison.
//!
//! This module defines the Avro schema type system, its canonical JSON
//! encoder, the discriminating JSON decoder, and structural equality with
//! union membership testing.

mod encoder;
mod equality;
mod parser;
mod serde_impl;
mod types;

pub use encoder::encode;
pub use equality::{contains, equal};
pub use parser::{
    decode, decode_into, parse_schema, FromSchemaJson, SchemaParser, DEFAULT_MAX_DEPTH,
};
pub use types::*;
