//! Serde support for [`Schema`].
//!
//! A schema serializes to its canonical JSON form and deserializes through
//! the same dispatch as [`decode`](super::decode), so it can be embedded in
//! any document handled by a serde format.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::schema::{Schema, SchemaParser};

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        SchemaParser::new()
            .parse_value(&value)
            .map_err(D::Error::custom)
    }
}
