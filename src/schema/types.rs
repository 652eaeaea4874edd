//! Avro schema types and representations.
//!
//! This module defines the closed Avro schema type system: primitives,
//! the stateless logical types, decimals, named types (record, enum,
//! fixed) and the unnamed composites (array, map, union).
//!
//! The types here carry no codec or comparison behavior of their own;
//! encoding, decoding and equality are implemented in sibling modules.

use std::borrow::Cow;
use std::fmt;

use serde_json::Value;

/// Represents an Avro schema.
///
/// Every variant reports its Avro type keyword through [`Schema::type_name`],
/// which is also the discriminator used when decoding and comparing schemas.
#[derive(Debug, Clone)]
pub enum Schema {
    /// Primitive type such as `"int"` or `"string"`.
    Primitive(Primitive),
    /// Stateless logical type (date, time-*, timestamp-*, duration).
    Logical(LogicalKind),
    /// Record type with named fields.
    Record(RecordSchema),
    /// Enumeration type.
    Enum(EnumSchema),
    /// Array of items with a single schema.
    Array(Box<Schema>),
    /// Map with string keys and values of a single schema.
    Map(Box<Schema>),
    /// Fixed-size byte array.
    Fixed(FixedSchema),
    /// Decimal logical type over bytes.
    Decimal(DecimalSchema),
    /// Union of multiple schemas, in declaration order.
    Union(Vec<Schema>),
}

/// An Avro primitive type, identified by its name.
///
/// The eight names defined by Avro are available as constants. Any other
/// string is still representable so that a permissive decode never loses
/// information; [`Primitive::is_known`] tells the two apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Primitive(Cow<'static, str>);

impl Primitive {
    pub const NULL: Primitive = Primitive(Cow::Borrowed("null"));
    pub const BOOLEAN: Primitive = Primitive(Cow::Borrowed("boolean"));
    pub const INT: Primitive = Primitive(Cow::Borrowed("int"));
    pub const LONG: Primitive = Primitive(Cow::Borrowed("long"));
    pub const FLOAT: Primitive = Primitive(Cow::Borrowed("float"));
    pub const DOUBLE: Primitive = Primitive(Cow::Borrowed("double"));
    pub const BYTES: Primitive = Primitive(Cow::Borrowed("bytes"));
    pub const STRING: Primitive = Primitive(Cow::Borrowed("string"));

    /// Names of the eight primitive types defined by Avro.
    pub const KNOWN_NAMES: [&'static str; 8] = [
        "null", "boolean", "int", "long", "float", "double", "bytes", "string",
    ];

    /// Create a primitive from an arbitrary name.
    ///
    /// Known names reuse the static constant storage.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        match Self::KNOWN_NAMES.iter().find(|known| **known == name) {
            Some(known) => Primitive(Cow::Borrowed(*known)),
            None => Primitive(Cow::Owned(name)),
        }
    }

    /// The primitive's type name.
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Whether this is one of the eight primitive types defined by Avro.
    pub fn is_known(&self) -> bool {
        Self::KNOWN_NAMES.iter().any(|known| *known == self.name())
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The stateless logical types.
///
/// These carry no parameters, so two values of the same kind always
/// denote the same type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalKind {
    /// Days since the Unix epoch, over `int`.
    Date,
    /// Milliseconds after midnight, over `int`.
    TimeMillis,
    /// Microseconds after midnight, over `long`.
    TimeMicros,
    /// Milliseconds since the Unix epoch, over `long`.
    TimestampMillis,
    /// Microseconds since the Unix epoch, over `long`.
    TimestampMicros,
    /// Months, days and milliseconds, over `fixed` of size 12.
    Duration,
}

impl LogicalKind {
    /// All logical kinds, in declaration order.
    pub const ALL: [LogicalKind; 6] = [
        LogicalKind::Date,
        LogicalKind::TimeMillis,
        LogicalKind::TimeMicros,
        LogicalKind::TimestampMillis,
        LogicalKind::TimestampMicros,
        LogicalKind::Duration,
    ];

    /// Size in bytes of the fixed type underlying `duration`.
    pub const DURATION_SIZE: usize = 12;

    /// Get the `logicalType` string of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            LogicalKind::Date => "date",
            LogicalKind::TimeMillis => "time-millis",
            LogicalKind::TimeMicros => "time-micros",
            LogicalKind::TimestampMillis => "timestamp-millis",
            LogicalKind::TimestampMicros => "timestamp-micros",
            LogicalKind::Duration => "duration",
        }
    }

    /// Look up a kind by its `logicalType` string.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// The Avro type the logical type annotates.
    pub fn base_type(&self) -> &'static str {
        match self {
            LogicalKind::Date | LogicalKind::TimeMillis => "int",
            LogicalKind::TimeMicros
            | LogicalKind::TimestampMillis
            | LogicalKind::TimestampMicros => "long",
            LogicalKind::Duration => "fixed",
        }
    }
}

impl fmt::Display for LogicalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Schema for a record type.
#[derive(Debug, Clone, Default)]
pub struct RecordSchema {
    /// The name of the record.
    pub name: String,
    /// Optional namespace for the record.
    pub namespace: Option<String>,
    /// Optional documentation.
    pub doc: Option<String>,
    /// Aliases for this record.
    pub aliases: Vec<String>,
    /// The fields of the record, in declaration order.
    pub fields: Vec<FieldSchema>,
}

impl RecordSchema {
    /// Create a new RecordSchema with the given name and fields.
    pub fn new(name: impl Into<String>, fields: Vec<FieldSchema>) -> Self {
        Self {
            name: name.into(),
            fields,
            ..Self::default()
        }
    }

    /// Set the namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set the documentation.
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Set the aliases.
    pub fn with_aliases(mut self, aliases: Vec<String>) -> Self {
        self.aliases = aliases;
        self
    }

    /// Get the fully qualified name.
    pub fn fullname(&self) -> String {
        fullname(&self.name, self.namespace.as_deref())
    }

    /// Find a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Schema for a field within a record.
///
/// A field is a named, typed slot rather than a schema of its own. Only
/// `name` and `schema` take part in equality; the remaining attributes are
/// carried so that encoding reproduces them.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    /// The name of the field.
    pub name: String,
    /// The schema of the field's value.
    pub schema: Schema,
    /// Optional documentation.
    pub doc: Option<String>,
    /// Optional default value for the field.
    pub default: Option<Value>,
    /// Aliases for this field.
    pub aliases: Vec<String>,
    /// Field ordering. Unrecognized values decode as ascending.
    pub order: FieldOrder,
}

impl FieldSchema {
    /// Create a new FieldSchema with the given name and schema.
    pub fn new(name: impl Into<String>, schema: impl Into<Schema>) -> Self {
        Self {
            name: name.into(),
            schema: schema.into(),
            doc: None,
            default: None,
            aliases: Vec::new(),
            order: FieldOrder::Ascending,
        }
    }

    /// Set the default value.
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Set the documentation.
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Set the aliases.
    pub fn with_aliases(mut self, aliases: Vec<String>) -> Self {
        self.aliases = aliases;
        self
    }

    /// Set the sort order.
    pub fn with_order(mut self, order: FieldOrder) -> Self {
        self.order = order;
        self
    }
}

/// Field ordering for record comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldOrder {
    #[default]
    Ascending,
    Descending,
    Ignore,
}

impl FieldOrder {
    /// The `order` attribute value.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldOrder::Ascending => "ascending",
            FieldOrder::Descending => "descending",
            FieldOrder::Ignore => "ignore",
        }
    }

    /// Parse an `order` attribute value.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ascending" => Some(FieldOrder::Ascending),
            "descending" => Some(FieldOrder::Descending),
            "ignore" => Some(FieldOrder::Ignore),
            _ => None,
        }
    }
}

/// Schema for an enumeration type.
#[derive(Debug, Clone, Default)]
pub struct EnumSchema {
    /// The name of the enum.
    pub name: String,
    /// Optional namespace for the enum.
    pub namespace: Option<String>,
    /// Optional documentation.
    pub doc: Option<String>,
    /// Aliases for this enum.
    pub aliases: Vec<String>,
    /// The symbols of the enum. Order is significant.
    pub symbols: Vec<String>,
}

impl EnumSchema {
    /// Create a new EnumSchema with the given name and symbols.
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        symbols: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            name: name.into(),
            symbols: symbols.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Set the namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set the documentation.
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Set the aliases.
    pub fn with_aliases(mut self, aliases: Vec<String>) -> Self {
        self.aliases = aliases;
        self
    }

    /// Get the fully qualified name.
    pub fn fullname(&self) -> String {
        fullname(&self.name, self.namespace.as_deref())
    }

    /// Get the index of a symbol.
    pub fn symbol_index(&self, symbol: &str) -> Option<usize> {
        self.symbols.iter().position(|s| s == symbol)
    }
}

/// Schema for a fixed-size byte array.
#[derive(Debug, Clone, Default)]
pub struct FixedSchema {
    /// The name of the fixed type.
    pub name: String,
    /// Optional namespace for the fixed type.
    pub namespace: Option<String>,
    /// The size in bytes.
    pub size: usize,
    /// Aliases for this fixed type.
    pub aliases: Vec<String>,
}

impl FixedSchema {
    /// Create a new FixedSchema with the given name and size.
    pub fn new(name: impl Into<String>, size: usize) -> Self {
        Self {
            name: name.into(),
            size,
            ..Self::default()
        }
    }

    /// Set the namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set the aliases.
    pub fn with_aliases(mut self, aliases: Vec<String>) -> Self {
        self.aliases = aliases;
        self
    }

    /// Get the fully qualified name.
    pub fn fullname(&self) -> String {
        fullname(&self.name, self.namespace.as_deref())
    }
}

/// Decimal logical type, stored as two's-complement bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DecimalSchema {
    /// Maximum number of significant digits.
    pub precision: u32,
    /// Number of digits to the right of the decimal point.
    pub scale: u32,
}

impl DecimalSchema {
    /// Create a new DecimalSchema.
    pub fn new(precision: u32, scale: u32) -> Self {
        Self { precision, scale }
    }
}

fn fullname(name: &str, namespace: Option<&str>) -> String {
    match namespace {
        Some(ns) if !ns.is_empty() => format!("{}.{}", ns, name),
        _ => name.to_string(),
    }
}

impl Schema {
    pub fn null() -> Self {
        Schema::Primitive(Primitive::NULL)
    }

    pub fn boolean() -> Self {
        Schema::Primitive(Primitive::BOOLEAN)
    }

    pub fn int() -> Self {
        Schema::Primitive(Primitive::INT)
    }

    pub fn long() -> Self {
        Schema::Primitive(Primitive::LONG)
    }

    pub fn float() -> Self {
        Schema::Primitive(Primitive::FLOAT)
    }

    pub fn double() -> Self {
        Schema::Primitive(Primitive::DOUBLE)
    }

    pub fn bytes() -> Self {
        Schema::Primitive(Primitive::BYTES)
    }

    pub fn string() -> Self {
        Schema::Primitive(Primitive::STRING)
    }

    /// Build an array schema over `items`.
    pub fn array(items: impl Into<Schema>) -> Self {
        Schema::Array(Box::new(items.into()))
    }

    /// Build a map schema over `values`.
    pub fn map(values: impl Into<Schema>) -> Self {
        Schema::Map(Box::new(values.into()))
    }

    /// Build a union of `members`, preserving their order.
    pub fn union(members: impl IntoIterator<Item = Schema>) -> Self {
        Schema::Union(members.into_iter().collect())
    }

    /// Get the Avro type name of this schema.
    ///
    /// # Example
    /// ```
    /// use avroschema::{LogicalKind, Schema};
    ///
    /// assert_eq!(Schema::string().type_name(), "string");
    /// assert_eq!(Schema::Logical(LogicalKind::TimeMillis).type_name(), "time-millis");
    /// assert_eq!(Schema::union([Schema::null()]).type_name(), "union");
    /// ```
    pub fn type_name(&self) -> &str {
        match self {
            Schema::Primitive(p) => p.name(),
            Schema::Logical(kind) => kind.name(),
            Schema::Record(_) => "record",
            Schema::Enum(_) => "enum",
            Schema::Array(_) => "array",
            Schema::Map(_) => "map",
            Schema::Fixed(_) => "fixed",
            Schema::Decimal(_) => "decimal",
            Schema::Union(_) => "union",
        }
    }

    /// Check if this schema is a primitive type.
    pub fn is_primitive(&self) -> bool {
        matches!(self, Schema::Primitive(_))
    }

    /// Check if this schema is a logical type (including decimal).
    pub fn is_logical(&self) -> bool {
        matches!(self, Schema::Logical(_) | Schema::Decimal(_))
    }

    /// Check if this schema is a named type (record, enum, or fixed).
    pub fn is_named(&self) -> bool {
        matches!(self, Schema::Record(_) | Schema::Enum(_) | Schema::Fixed(_))
    }

    /// Get the name of a named type, if applicable.
    pub fn name(&self) -> Option<&str> {
        match self {
            Schema::Record(r) => Some(&r.name),
            Schema::Enum(e) => Some(&e.name),
            Schema::Fixed(f) => Some(&f.name),
            _ => None,
        }
    }

    /// Get the fully qualified name of a named type, if applicable.
    pub fn fullname(&self) -> Option<String> {
        match self {
            Schema::Record(r) => Some(r.fullname()),
            Schema::Enum(e) => Some(e.fullname()),
            Schema::Fixed(f) => Some(f.fullname()),
            _ => None,
        }
    }

    /// Check if this schema represents a nullable type (union with null).
    pub fn is_nullable(&self) -> bool {
        match self {
            Schema::Union(members) => members.iter().any(Schema::is_null),
            _ => false,
        }
    }

    /// For a two-member nullable union, get the non-null schema.
    pub fn nullable_inner(&self) -> Option<&Schema> {
        match self {
            Schema::Union(members) if members.len() == 2 && self.is_nullable() => {
                members.iter().find(|m| !m.is_null())
            }
            _ => None,
        }
    }

    fn is_null(&self) -> bool {
        matches!(self, Schema::Primitive(p) if *p == Primitive::NULL)
    }
}

impl From<Primitive> for Schema {
    fn from(p: Primitive) -> Self {
        Schema::Primitive(p)
    }
}

impl From<LogicalKind> for Schema {
    fn from(kind: LogicalKind) -> Self {
        Schema::Logical(kind)
    }
}

impl From<RecordSchema> for Schema {
    fn from(r: RecordSchema) -> Self {
        Schema::Record(r)
    }
}

impl From<EnumSchema> for Schema {
    fn from(e: EnumSchema) -> Self {
        Schema::Enum(e)
    }
}

impl From<FixedSchema> for Schema {
    fn from(f: FixedSchema) -> Self {
        Schema::Fixed(f)
    }
}

impl From<DecimalSchema> for Schema {
    fn from(d: DecimalSchema) -> Self {
        Schema::Decimal(d)
    }
}
