//! Canonical JSON encoding of Avro schemas.
//!
//! Every variant has exactly one encoded form, and that form is what the
//! [parser](super::parser) accepts. Optional attributes are left out when
//! they are empty so that the output stays minimal.

use std::fmt;

use serde_json::{json, Map, Value};

use crate::error::SchemaError;
use crate::schema::{
    DecimalSchema, EnumSchema, FieldOrder, FieldSchema, FixedSchema, LogicalKind, RecordSchema,
    Schema,
};

/// Encode a schema to its canonical JSON bytes.
///
/// # Example
/// ```
/// use avroschema::{encode, Schema};
///
/// let bytes = encode(&Schema::array(Schema::string())).unwrap();
/// assert_eq!(bytes, br#"{"type":"array","items":"string"}"#);
/// ```
pub fn encode(schema: &Schema) -> Result<Vec<u8>, SchemaError> {
    Ok(serde_json::to_vec(&schema.to_json_value())?)
}

impl Schema {
    /// Serialize the schema to a JSON string.
    ///
    /// # Example
    /// ```
    /// use avroschema::Schema;
    ///
    /// assert_eq!(Schema::string().to_json(), r#""string""#);
    /// ```
    pub fn to_json(&self) -> String {
        self.to_json_value().to_string()
    }

    /// Serialize the schema to a JSON Value.
    ///
    /// This is useful when you need to embed the schema in a larger JSON structure.
    pub fn to_json_value(&self) -> Value {
        match self {
            Schema::Primitive(p) => json!(p.name()),
            Schema::Logical(kind) => kind.to_json_value(),
            Schema::Record(r) => r.to_json_value(),
            Schema::Enum(e) => e.to_json_value(),
            Schema::Array(items) => {
                json!({
                    "type": "array",
                    "items": items.to_json_value()
                })
            }
            Schema::Map(values) => {
                json!({
                    "type": "map",
                    "values": values.to_json_value()
                })
            }
            Schema::Fixed(f) => f.to_json_value(),
            Schema::Decimal(d) => d.to_json_value(),
            Schema::Union(members) => {
                Value::Array(members.iter().map(Schema::to_json_value).collect())
            }
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json_value())
    }
}

impl LogicalKind {
    /// Serialize the logical type as its base type plus a `logicalType` marker.
    pub fn to_json_value(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("type".to_string(), json!(self.base_type()));
        obj.insert("logicalType".to_string(), json!(self.name()));
        if let LogicalKind::Duration = self {
            obj.insert("size".to_string(), json!(LogicalKind::DURATION_SIZE));
        }
        Value::Object(obj)
    }
}

impl RecordSchema {
    /// Serialize the record schema to a JSON Value.
    pub fn to_json_value(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("type".to_string(), json!("record"));
        obj.insert("name".to_string(), json!(&self.name));
        insert_named_attributes(&mut obj, self.namespace.as_deref(), &self.aliases);
        insert_non_empty(&mut obj, "doc", self.doc.as_deref());

        let fields: Vec<Value> = self.fields.iter().map(|f| f.to_json_value()).collect();
        obj.insert("fields".to_string(), Value::Array(fields));

        Value::Object(obj)
    }
}

impl FieldSchema {
    /// Serialize the field schema to a JSON Value.
    pub fn to_json_value(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("name".to_string(), json!(&self.name));
        obj.insert("type".to_string(), self.schema.to_json_value());
        insert_non_empty(&mut obj, "doc", self.doc.as_deref());

        if let Some(default) = &self.default {
            obj.insert("default".to_string(), default.clone());
        }

        if !self.aliases.is_empty() {
            obj.insert("aliases".to_string(), json!(&self.aliases));
        }

        if self.order != FieldOrder::Ascending {
            obj.insert("order".to_string(), json!(self.order.as_str()));
        }

        Value::Object(obj)
    }
}

impl EnumSchema {
    /// Serialize the enum schema to a JSON Value.
    pub fn to_json_value(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("type".to_string(), json!("enum"));
        obj.insert("name".to_string(), json!(&self.name));
        insert_named_attributes(&mut obj, self.namespace.as_deref(), &self.aliases);
        insert_non_empty(&mut obj, "doc", self.doc.as_deref());
        obj.insert("symbols".to_string(), json!(&self.symbols));
        Value::Object(obj)
    }
}

impl FixedSchema {
    /// Serialize the fixed schema to a JSON Value.
    pub fn to_json_value(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("type".to_string(), json!("fixed"));
        obj.insert("name".to_string(), json!(&self.name));
        insert_named_attributes(&mut obj, self.namespace.as_deref(), &self.aliases);
        obj.insert("size".to_string(), json!(self.size));
        Value::Object(obj)
    }
}

impl DecimalSchema {
    /// Serialize the decimal as a `bytes` type carrying a `decimal` marker.
    pub fn to_json_value(&self) -> Value {
        json!({
            "type": "bytes",
            "logicalType": "decimal",
            "precision": self.precision,
            "scale": self.scale
        })
    }
}

fn insert_named_attributes(
    obj: &mut Map<String, Value>,
    namespace: Option<&str>,
    aliases: &[String],
) {
    insert_non_empty(obj, "namespace", namespace);
    if !aliases.is_empty() {
        obj.insert("aliases".to_string(), json!(aliases));
    }
}

fn insert_non_empty(obj: &mut Map<String, Value>, key: &str, value: Option<&str>) {
    if let Some(v) = value.filter(|v| !v.is_empty()) {
        obj.insert(key.to_string(), json!(v));
    }
}
