//! Structural schema equality and union membership.
//!
//! Two schemas are equal when they denote the same Avro type. Comparison
//! first rejects schemas with different type names, then applies the rule
//! of the shared variant. Documentation, aliases, field defaults and field
//! order are informational and never compared.

use crate::schema::{EnumSchema, FieldSchema, FixedSchema, RecordSchema, Schema};

/// Returns true if the two schemas are equivalent.
///
/// Unions compare positionally: `["null", "string"]` and
/// `["string", "null"]` are different schemas. Use [`contains`] for an
/// order-independent membership check.
pub fn equal(a: &Schema, b: &Schema) -> bool {
    if a.type_name() != b.type_name() {
        return false;
    }

    match (a, b) {
        // The type name is the whole identity of primitives and logical kinds.
        (Schema::Primitive(_), Schema::Primitive(_)) => true,
        (Schema::Logical(_), Schema::Logical(_)) => true,
        (Schema::Union(x), Schema::Union(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(s1, s2)| equal(s1, s2))
        }
        (Schema::Record(x), Schema::Record(y)) => x.is_equal(y),
        (Schema::Enum(x), Schema::Enum(y)) => x.is_equal(y),
        (Schema::Array(x), Schema::Array(y)) => equal(x, y),
        (Schema::Map(x), Schema::Map(y)) => equal(x, y),
        (Schema::Fixed(x), Schema::Fixed(y)) => x.is_equal(y),
        (Schema::Decimal(x), Schema::Decimal(y)) => x == y,
        _ => false,
    }
}

/// Returns true if `schema` accepts `member`.
///
/// For a union this checks whether any member equals `member`, regardless
/// of position. For any other schema it is plain [`equal`].
///
/// # Example
/// ```
/// use avroschema::{contains, Schema};
///
/// let u = Schema::union([Schema::null(), Schema::string()]);
/// assert!(contains(&u, &Schema::string()));
/// assert!(contains(&u, &Schema::null()));
/// assert!(!contains(&u, &Schema::int()));
/// ```
pub fn contains(schema: &Schema, member: &Schema) -> bool {
    match schema {
        Schema::Union(members) => members.iter().any(|s| equal(s, member)),
        _ => equal(schema, member),
    }
}

impl Schema {
    /// Returns true if this schema accepts `member`. See [`contains`].
    pub fn contains(&self, member: &Schema) -> bool {
        contains(self, member)
    }
}

impl RecordSchema {
    /// Name, namespace and fields (positionally) must match.
    pub fn is_equal(&self, other: &RecordSchema) -> bool {
        self.name == other.name
            && same_namespace(self.namespace.as_deref(), other.namespace.as_deref())
            && self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .zip(&other.fields)
                .all(|(f1, f2)| f1.is_equal(f2))
    }
}

impl FieldSchema {
    /// Fields are equal when their names and types are equal.
    pub fn is_equal(&self, other: &FieldSchema) -> bool {
        self.name == other.name && equal(&self.schema, &other.schema)
    }
}

impl EnumSchema {
    /// Name, namespace and symbols (in order) must match.
    pub fn is_equal(&self, other: &EnumSchema) -> bool {
        self.name == other.name
            && same_namespace(self.namespace.as_deref(), other.namespace.as_deref())
            && self.symbols == other.symbols
    }
}

impl FixedSchema {
    /// Name, namespace and size must match.
    pub fn is_equal(&self, other: &FixedSchema) -> bool {
        self.name == other.name
            && same_namespace(self.namespace.as_deref(), other.namespace.as_deref())
            && self.size == other.size
    }
}

/// An absent namespace and an empty one both mean "no namespace".
fn same_namespace(a: Option<&str>, b: Option<&str>) -> bool {
    a.unwrap_or("") == b.unwrap_or("")
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        equal(self, other)
    }
}

impl Eq for Schema {}

impl PartialEq for RecordSchema {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal(other)
    }
}

impl Eq for RecordSchema {}

impl PartialEq for FieldSchema {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal(other)
    }
}

impl Eq for FieldSchema {}

impl PartialEq for EnumSchema {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal(other)
    }
}

impl Eq for EnumSchema {}

impl PartialEq for FixedSchema {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal(other)
    }
}

impl Eq for FixedSchema {}
