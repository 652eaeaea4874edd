//! Avro schema data model and JSON codec
//!
//! This library models the Apache Avro schema language as a closed Rust
//! enum, encodes it to canonical schema JSON, decodes that JSON back into
//! the right variant, and compares schemas structurally.
//!
//! # Example
//! ```
//! use avroschema::{contains, decode, encode, EnumSchema, FieldSchema, RecordSchema, Schema};
//!
//! let sex = Schema::Enum(EnumSchema::new("sex", ["Male", "Female", "Unknown"]));
//! let participant = Schema::Record(RecordSchema::new(
//!     "participant",
//!     vec![
//!         FieldSchema::new("id", Schema::string()),
//!         FieldSchema::new("sex", Schema::union([Schema::null(), sex.clone()])),
//!     ],
//! ));
//!
//! let bytes = encode(&participant).unwrap();
//! let decoded = decode(&bytes).unwrap().unwrap();
//! assert_eq!(decoded, participant);
//!
//! if let Schema::Record(record) = &decoded {
//!     assert!(contains(&record.fields[1].schema, &sex));
//! }
//! ```

pub mod error;
pub mod schema;

// Re-export main types
pub use error::SchemaError;
pub use schema::{
    contains, decode, decode_into, encode, equal, parse_schema, DecimalSchema, EnumSchema,
    FieldOrder, FieldSchema, FixedSchema, FromSchemaJson, LogicalKind, Primitive, RecordSchema,
    Schema, SchemaParser, DEFAULT_MAX_DEPTH,
};
