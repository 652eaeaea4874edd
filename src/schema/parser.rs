//! JSON schema decoder for Avro schemas.
//!
//! Decoding happens in two phases. The text is first parsed once into a
//! generic [`serde_json::Value`] tree, then the tree is dispatched on its
//! shape: a string is a primitive, an array is a union, and an object is
//! resolved through its `logicalType` and `type` attributes. Nested
//! schemas (field types, array items, map values, union members) re-enter
//! the same dispatch.

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, trace, warn};

use crate::error::SchemaError;
use crate::schema::{
    DecimalSchema, EnumSchema, FieldOrder, FieldSchema, FixedSchema, LogicalKind, Primitive,
    RecordSchema, Schema,
};

/// Default bound on schema nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// JSON levels one schema level can open: a record object, its `fields`
/// array and a field object.
const JSON_LEVELS_PER_SCHEMA: usize = 3;

/// Extra JSON nesting allowed for values that are not schemas, such as
/// field defaults.
const JSON_VALUE_HEADROOM: usize = 128;

/// Decode a schema from JSON bytes.
///
/// Empty (or all-whitespace) input decodes to `None`.
///
/// # Example
/// ```
/// use avroschema::{decode, Schema};
///
/// let schema = decode(br#"["null", "string"]"#).unwrap().unwrap();
/// assert_eq!(schema, Schema::union([Schema::null(), Schema::string()]));
///
/// assert!(decode(b"  ").unwrap().is_none());
/// ```
pub fn decode(bytes: &[u8]) -> Result<Option<Schema>, SchemaError> {
    SchemaParser::new().decode(bytes)
}

/// Decode a schema from JSON bytes into a caller-chosen shape.
///
/// Use this when the top-level variant is known ahead of time, e.g. a
/// record. Nested schemas are still decoded through the generic dispatch.
///
/// # Example
/// ```
/// use avroschema::{decode_into, RecordSchema};
///
/// let mut record = RecordSchema::default();
/// decode_into(
///     br#"{"type": "record", "name": "User", "fields": [{"name": "id", "type": "long"}]}"#,
///     &mut record,
/// )
/// .unwrap();
/// assert_eq!(record.name, "User");
/// ```
pub fn decode_into<T: FromSchemaJson>(bytes: &[u8], target: &mut T) -> Result<(), SchemaError> {
    SchemaParser::new().decode_into(bytes, target)
}

/// Parse an Avro schema from a JSON string.
///
/// Unlike [`decode`], empty input is an error.
///
/// # Example
/// ```
/// use avroschema::{parse_schema, Schema};
///
/// let schema = parse_schema(r#""string""#).unwrap();
/// assert_eq!(schema, Schema::string());
/// ```
pub fn parse_schema(json: &str) -> Result<Schema, SchemaError> {
    SchemaParser::new().parse_str(json)
}

/// A schema shape that [`decode_into`] can produce.
pub trait FromSchemaJson: Sized {
    /// Convert a fully decoded schema into this shape.
    fn from_schema(schema: Schema) -> Result<Self, SchemaError>;
}

impl FromSchemaJson for Schema {
    fn from_schema(schema: Schema) -> Result<Self, SchemaError> {
        Ok(schema)
    }
}

impl FromSchemaJson for RecordSchema {
    fn from_schema(schema: Schema) -> Result<Self, SchemaError> {
        match schema {
            Schema::Record(r) => Ok(r),
            other => Err(mismatch("record", &other)),
        }
    }
}

impl FromSchemaJson for EnumSchema {
    fn from_schema(schema: Schema) -> Result<Self, SchemaError> {
        match schema {
            Schema::Enum(e) => Ok(e),
            other => Err(mismatch("enum", &other)),
        }
    }
}

impl FromSchemaJson for FixedSchema {
    fn from_schema(schema: Schema) -> Result<Self, SchemaError> {
        match schema {
            Schema::Fixed(f) => Ok(f),
            other => Err(mismatch("fixed", &other)),
        }
    }
}

impl FromSchemaJson for DecimalSchema {
    fn from_schema(schema: Schema) -> Result<Self, SchemaError> {
        match schema {
            Schema::Decimal(d) => Ok(d),
            other => Err(mismatch("decimal", &other)),
        }
    }
}

impl FromSchemaJson for LogicalKind {
    fn from_schema(schema: Schema) -> Result<Self, SchemaError> {
        match schema {
            Schema::Logical(kind) => Ok(kind),
            other => Err(mismatch("logical", &other)),
        }
    }
}

impl FromSchemaJson for Primitive {
    fn from_schema(schema: Schema) -> Result<Self, SchemaError> {
        match schema {
            Schema::Primitive(p) => Ok(p),
            other => Err(mismatch("primitive", &other)),
        }
    }
}

fn mismatch(expected: &str, found: &Schema) -> SchemaError {
    SchemaError::TypeMismatch {
        expected: expected.to_string(),
        found: found.type_name().to_string(),
    }
}

/// Configurable schema decoder.
///
/// The default parser is permissive: primitive names are not checked
/// against the eight Avro primitives, and naming or union rule violations
/// are logged as warnings. Strict mode turns those findings into errors.
#[derive(Debug, Clone)]
pub struct SchemaParser {
    /// Whether to enforce strict schema validation
    strict_schema: bool,
    /// Deepest allowed schema nesting
    max_depth: usize,
}

impl Default for SchemaParser {
    fn default() -> Self {
        Self {
            strict_schema: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl SchemaParser {
    /// Create a new SchemaParser with default settings (permissive mode).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new SchemaParser with strict validation enabled.
    ///
    /// In strict mode:
    /// - Primitive names must be one of the eight Avro primitives
    /// - Names must follow Avro naming rules (start with letter/underscore, contain only alphanumeric/underscore)
    /// - Enums must declare at least one symbol
    /// - Union types cannot contain nested unions or duplicate types
    /// - Decimal scale cannot exceed precision, and precision must be positive
    /// - Field `order` must be one of ascending, descending, ignore
    pub fn new_strict() -> Self {
        Self::default().with_strict(true)
    }

    /// Set whether to use strict schema validation.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict_schema = strict;
        self
    }

    /// Set the deepest allowed schema nesting.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Whether strict validation is enabled.
    pub fn is_strict(&self) -> bool {
        self.strict_schema
    }

    /// The deepest allowed schema nesting.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Decode a schema from JSON bytes.
    ///
    /// Dispatch starts from the first non-whitespace byte: `"` for a
    /// primitive, `[` for a union, `{` for a complex or logical type.
    /// Empty input decodes to `None`.
    pub fn decode(&self, bytes: &[u8]) -> Result<Option<Schema>, SchemaError> {
        let trimmed = bytes.trim_ascii();
        let Some(first) = trimmed.first() else {
            return Ok(None);
        };

        debug!(len = trimmed.len(), strict = self.strict_schema, "Decoding schema");

        match *first {
            b'"' | b'[' | b'{' => {
                let value = self.read_json(trimmed)?;
                self.parse_value(&value).map(Some)
            }
            _ => Err(SchemaError::Unrecognized(
                String::from_utf8_lossy(trimmed).into_owned(),
            )),
        }
    }

    /// Parse JSON text into a generic tree, bounded by the configured depth.
    ///
    /// serde_json's own recursion limit is switched off so that `max_depth`
    /// is the only bound. Text nested deeper than any schema within that
    /// bound could be is rejected before it is parsed.
    fn read_json(&self, bytes: &[u8]) -> Result<Value, SchemaError> {
        let json_limit = self
            .max_depth
            .saturating_add(1)
            .saturating_mul(JSON_LEVELS_PER_SCHEMA)
            .saturating_add(JSON_VALUE_HEADROOM);
        let nesting = json_nesting(bytes);
        if nesting > json_limit {
            debug!(nesting, json_limit, "Schema text nested too deeply");
            return Err(SchemaError::DepthLimitExceeded(self.max_depth));
        }

        let mut de = serde_json::Deserializer::from_slice(bytes);
        de.disable_recursion_limit();
        let value = Value::deserialize(&mut de)?;
        de.end()?;
        Ok(value)
    }

    /// Decode into a caller-chosen shape. See [`decode_into`].
    pub fn decode_into<T: FromSchemaJson>(
        &self,
        bytes: &[u8],
        target: &mut T,
    ) -> Result<(), SchemaError> {
        let schema = self
            .decode(bytes)?
            .ok_or_else(|| SchemaError::invalid("empty schema input"))?;
        *target = T::from_schema(schema)?;
        Ok(())
    }

    /// Parse a schema from a JSON string. Empty input is an error.
    pub fn parse_str(&self, json: &str) -> Result<Schema, SchemaError> {
        self.decode(json.as_bytes())?
            .ok_or_else(|| SchemaError::invalid("empty schema input"))
    }

    /// Parse an already-decoded JSON value into a Schema.
    pub fn parse_value(&self, value: &Value) -> Result<Schema, SchemaError> {
        self.parse(value, 0)
    }

    fn parse(&self, value: &Value, depth: usize) -> Result<Schema, SchemaError> {
        if depth > self.max_depth {
            return Err(SchemaError::DepthLimitExceeded(self.max_depth));
        }

        match value {
            Value::String(s) => self.parse_primitive(s),
            Value::Array(arr) => self.parse_union(arr, depth),
            Value::Object(obj) => self.parse_object(obj, depth),
            other => Err(SchemaError::Unrecognized(other.to_string())),
        }
    }

    /// A bare string is always a primitive; the name is only checked in strict mode.
    fn parse_primitive(&self, name: &str) -> Result<Schema, SchemaError> {
        let primitive = Primitive::new(name);
        if !primitive.is_known() {
            self.violation(format!("'{}' is not an Avro primitive type", name))?;
        }
        Ok(Schema::Primitive(primitive))
    }

    fn parse_union(&self, arr: &[Value], depth: usize) -> Result<Schema, SchemaError> {
        let members = arr
            .iter()
            .map(|v| self.parse(v, depth + 1))
            .collect::<Result<Vec<_>, _>>()?;

        self.validate_union(&members)?;

        Ok(Schema::Union(members))
    }

    /// Dispatch an object on its `logicalType`, then its `type`.
    fn parse_object(&self, obj: &Map<String, Value>, depth: usize) -> Result<Schema, SchemaError> {
        let type_name = optional_str(obj, "type")?;
        let logical_type = optional_str(obj, "logicalType")?;

        trace!(
            depth,
            schema_type = type_name.unwrap_or(""),
            logical_type = logical_type.unwrap_or(""),
            "Dispatching schema object"
        );

        if let Some(logical) = logical_type.filter(|s| !s.is_empty()) {
            if logical == "decimal" {
                return self.parse_decimal(obj).map(Schema::Decimal);
            }
            return LogicalKind::from_name(logical)
                .map(Schema::Logical)
                .ok_or_else(|| SchemaError::UnknownLogicalType(logical.to_string()));
        }

        match type_name.unwrap_or("") {
            "record" => self.parse_record(obj, depth).map(Schema::Record),
            "enum" => self.parse_enum(obj).map(Schema::Enum),
            "array" => {
                let items = required(obj, "items", "Array")?;
                Ok(Schema::Array(Box::new(self.parse(items, depth + 1)?)))
            }
            "map" => {
                let values = required(obj, "values", "Map")?;
                Ok(Schema::Map(Box::new(self.parse(values, depth + 1)?)))
            }
            "fixed" => self.parse_fixed(obj).map(Schema::Fixed),
            other => Err(SchemaError::UnknownComplexType(other.to_string())),
        }
    }

    fn parse_record(
        &self,
        obj: &Map<String, Value>,
        depth: usize,
    ) -> Result<RecordSchema, SchemaError> {
        let name = required_str(obj, "name", "Record")?;
        self.validate_fullname(&name, "Record")?;

        let fields = match obj.get("fields") {
            Some(value) => value
                .as_array()
                .ok_or_else(|| SchemaError::invalid("Record 'fields' must be an array"))?
                .iter()
                .map(|f| self.parse_field(f, depth))
                .collect::<Result<Vec<_>, _>>()?,
            None => {
                self.violation(format!("Record '{}' missing 'fields' field", name))?;
                Vec::new()
            }
        };

        Ok(RecordSchema {
            name,
            namespace: optional_string(obj, "namespace")?,
            doc: optional_string(obj, "doc")?,
            aliases: string_list(obj, "aliases")?,
            fields,
        })
    }

    fn parse_field(&self, value: &Value, depth: usize) -> Result<FieldSchema, SchemaError> {
        let obj = value
            .as_object()
            .ok_or_else(|| SchemaError::invalid("Field must be an object"))?;

        let name = required_str(obj, "name", "Field")?;
        self.validate_name(&name, "Field")?;

        let schema = self.parse(required(obj, "type", "Field")?, depth + 1)?;

        // An unrecognized order is normalized to ascending when permissive.
        let order = match optional_str(obj, "order")? {
            None => FieldOrder::Ascending,
            Some(s) => match FieldOrder::from_name(s) {
                Some(order) => order,
                None => {
                    self.violation(format!("Field '{}' has unknown order '{}'", name, s))?;
                    FieldOrder::Ascending
                }
            },
        };

        Ok(FieldSchema {
            schema,
            doc: optional_string(obj, "doc")?,
            default: obj.get("default").cloned(),
            aliases: string_list(obj, "aliases")?,
            order,
            name,
        })
    }

    fn parse_enum(&self, obj: &Map<String, Value>) -> Result<EnumSchema, SchemaError> {
        let name = required_str(obj, "name", "Enum")?;
        self.validate_fullname(&name, "Enum")?;

        let symbols = string_list(obj, "symbols")?;

        if !obj.contains_key("symbols") {
            self.violation(format!("Enum '{}' missing 'symbols' field", name))?;
        } else if symbols.is_empty() {
            self.violation(format!("Enum '{}' must have at least one symbol", name))?;
        }
        for symbol in &symbols {
            self.validate_name(symbol, "Enum symbol")?;
        }

        Ok(EnumSchema {
            name,
            namespace: optional_string(obj, "namespace")?,
            doc: optional_string(obj, "doc")?,
            aliases: string_list(obj, "aliases")?,
            symbols,
        })
    }

    fn parse_fixed(&self, obj: &Map<String, Value>) -> Result<FixedSchema, SchemaError> {
        let name = required_str(obj, "name", "Fixed")?;
        self.validate_fullname(&name, "Fixed")?;

        let size = required(obj, "size", "Fixed")?
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| SchemaError::invalid("Fixed 'size' must be a non-negative integer"))?;

        Ok(FixedSchema {
            name,
            namespace: optional_string(obj, "namespace")?,
            size,
            aliases: string_list(obj, "aliases")?,
        })
    }

    fn parse_decimal(&self, obj: &Map<String, Value>) -> Result<DecimalSchema, SchemaError> {
        let precision = required(obj, "precision", "Decimal")
            .and_then(|v| as_u32(v, "Decimal 'precision'"))?;
        let scale = match obj.get("scale") {
            Some(v) => as_u32(v, "Decimal 'scale'")?,
            None => 0,
        };

        if precision == 0 {
            self.violation("Decimal precision must be positive".to_string())?;
        }
        if scale > precision {
            self.violation(format!(
                "Decimal scale {} exceeds precision {}",
                scale, precision
            ))?;
        }

        Ok(DecimalSchema { precision, scale })
    }

    /// Report a rule violation: an error in strict mode, a warning otherwise.
    fn violation(&self, msg: String) -> Result<(), SchemaError> {
        if self.strict_schema {
            Err(SchemaError::InvalidSchema(msg))
        } else {
            warn!("{}", msg);
            Ok(())
        }
    }

    /// Validate a possibly dotted name, one component at a time.
    fn validate_fullname(&self, name: &str, context: &str) -> Result<(), SchemaError> {
        if name.is_empty() {
            return self.validate_name(name, context);
        }
        for part in name.split('.') {
            self.validate_name(part, context)?;
        }
        Ok(())
    }

    /// Validate that a name follows Avro naming rules.
    ///
    /// Avro names must:
    /// - Start with [A-Za-z_]
    /// - Contain only [A-Za-z0-9_]
    fn validate_name(&self, name: &str, context: &str) -> Result<(), SchemaError> {
        let mut chars = name.chars();
        let Some(first) = chars.next() else {
            return self.violation(format!("{} name cannot be empty", context));
        };

        if !first.is_ascii_alphabetic() && first != '_' {
            return self.violation(format!(
                "{} name '{}' must start with a letter or underscore",
                context, name
            ));
        }

        if let Some(ch) = chars.find(|ch| !ch.is_ascii_alphanumeric() && *ch != '_') {
            return self.violation(format!(
                "{} name '{}' contains invalid character '{}' (only alphanumeric and underscore allowed)",
                context, name, ch
            ));
        }

        Ok(())
    }

    /// Validate union schema rules.
    ///
    /// Avro unions must:
    /// - Not contain duplicate types
    /// - Not contain nested unions
    fn validate_union(&self, members: &[Schema]) -> Result<(), SchemaError> {
        for (i, member) in members.iter().enumerate() {
            if matches!(member, Schema::Union(_)) {
                self.violation(format!(
                    "Union contains nested union at position {} (unions cannot be nested)",
                    i
                ))?;
            }
        }

        let mut seen_types = std::collections::HashSet::new();
        for (i, member) in members.iter().enumerate() {
            let type_key = type_key(member);
            if !seen_types.insert(type_key.clone()) {
                self.violation(format!(
                    "Union contains duplicate type '{}' at position {}",
                    type_key, i
                ))?;
            }
        }

        Ok(())
    }
}

/// Deepest bracket nesting in JSON text, not counting brackets in strings.
fn json_nesting(bytes: &[u8]) -> usize {
    let mut depth = 0usize;
    let mut deepest = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for &b in bytes {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'[' | b'{' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    deepest
}

/// A key identifying a union member's type for duplicate detection.
fn type_key(schema: &Schema) -> String {
    match schema.fullname() {
        Some(fullname) => format!("{}:{}", schema.type_name(), fullname),
        None => schema.type_name().to_string(),
    }
}

fn required<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
    context: &str,
) -> Result<&'a Value, SchemaError> {
    obj.get(key)
        .ok_or_else(|| SchemaError::invalid(format!("{} missing '{}' field", context, key)))
}

fn required_str(obj: &Map<String, Value>, key: &str, context: &str) -> Result<String, SchemaError> {
    required(obj, key, context)?
        .as_str()
        .map(String::from)
        .ok_or_else(|| SchemaError::invalid(format!("{} '{}' must be a string", context, key)))
}

fn optional_str<'a>(obj: &'a Map<String, Value>, key: &str) -> Result<Option<&'a str>, SchemaError> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(SchemaError::invalid(format!("'{}' must be a string", key))),
    }
}

fn optional_string(obj: &Map<String, Value>, key: &str) -> Result<Option<String>, SchemaError> {
    optional_str(obj, key).map(|s| s.map(String::from))
}

fn string_list(obj: &Map<String, Value>, key: &str) -> Result<Vec<String>, SchemaError> {
    let Some(value) = obj.get(key) else {
        return Ok(Vec::new());
    };
    let arr = value
        .as_array()
        .ok_or_else(|| SchemaError::invalid(format!("'{}' must be an array of strings", key)))?;
    arr.iter()
        .map(|v| {
            v.as_str().map(String::from).ok_or_else(|| {
                SchemaError::invalid(format!("'{}' must be an array of strings", key))
            })
        })
        .collect()
}

fn as_u32(value: &Value, what: &str) -> Result<u32, SchemaError> {
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| SchemaError::invalid(format!("{} must be a non-negative integer", what)))
}
