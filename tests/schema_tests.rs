//! Tests for Avro schema encoding, decoding and comparison.

use avroschema::schema::*;
use avroschema::SchemaError;
use serde_json::json;

fn participant_sex() -> Schema {
    Schema::Enum(EnumSchema::new("sex", ["Male", "Female", "Unknown"]))
}

fn participant() -> Schema {
    Schema::Record(RecordSchema::new(
        "participant",
        vec![
            FieldSchema::new("id", Schema::string()),
            FieldSchema::new("sex", Schema::union([Schema::null(), participant_sex()])),
        ],
    ))
}

fn round_trip(schema: &Schema) -> Schema {
    let bytes = encode(schema).unwrap();
    decode(&bytes)
        .unwrap_or_else(|e| panic!("Failed to decode {}: {}", String::from_utf8_lossy(&bytes), e))
        .expect("non-empty encoding")
}

// ============================================================================
// End-to-end
// ============================================================================

#[test]
fn test_participant_round_trip() {
    let original = participant();
    let decoded = round_trip(&original);

    assert!(equal(&original, &decoded));

    let Schema::Record(record) = decoded else {
        panic!("Expected Record schema");
    };
    assert_eq!(record.name, "participant");
    assert_eq!(record.fields.len(), 2);
    assert!(contains(&record.fields[1].schema, &participant_sex()));
    assert!(contains(&record.fields[1].schema, &Schema::null()));
    assert!(!contains(&record.fields[1].schema, &Schema::string()));
}

#[test]
fn test_participant_decode_into_record() {
    let bytes = encode(&participant()).unwrap();

    let mut record = RecordSchema::default();
    decode_into(&bytes, &mut record).unwrap();

    assert_eq!(Schema::Record(record), participant());
}

#[test]
fn test_record_with_logical_field() {
    let original = Schema::Record(RecordSchema::new(
        "Record",
        vec![
            FieldSchema::new("arcus_id", Schema::string()),
            FieldSchema::new(
                "dob",
                Schema::union([Schema::null(), Schema::Logical(LogicalKind::Date)]),
            ),
        ],
    ));
    assert_eq!(round_trip(&original), original);
}

// ============================================================================
// Decoder Tests - Primitive Types
// ============================================================================

#[test]
fn test_decode_primitive_string_schemas() {
    for name in Primitive::KNOWN_NAMES {
        let json = format!(r#""{}""#, name);
        let schema = parse_schema(&json).unwrap();
        assert_eq!(schema.type_name(), name);
        assert!(schema.is_primitive());
    }
}

#[test]
fn test_decode_primitive_object_is_not_a_complex_type() {
    // `{"type": "int"}` has no logical marker and is not a complex type.
    let err = parse_schema(r#"{"type": "int"}"#).unwrap_err();
    assert!(matches!(err, SchemaError::UnknownComplexType(ref t) if t == "int"));
    assert_eq!(err.to_string(), "avroschema: unknown complex type int");
}

#[test]
fn test_decode_bytes_and_decimal_types_are_not_complex() {
    assert!(matches!(
        parse_schema(r#"{"type": "bytes"}"#),
        Err(SchemaError::UnknownComplexType(_))
    ));
    assert!(matches!(
        parse_schema(r#"{"type": "decimal", "precision": 4}"#),
        Err(SchemaError::UnknownComplexType(_))
    ));
    assert!(matches!(
        parse_schema(r#"{"name": "untyped"}"#),
        Err(SchemaError::UnknownComplexType(ref t)) if t.is_empty()
    ));
}

// ============================================================================
// Decoder Tests - Logical Types
// ============================================================================

#[test]
fn test_decode_logical_types() {
    let cases = [
        (r#"{"type": "int", "logicalType": "date"}"#, LogicalKind::Date),
        (r#"{"type": "int", "logicalType": "time-millis"}"#, LogicalKind::TimeMillis),
        (r#"{"type": "long", "logicalType": "time-micros"}"#, LogicalKind::TimeMicros),
        (
            r#"{"type": "long", "logicalType": "timestamp-millis"}"#,
            LogicalKind::TimestampMillis,
        ),
        (
            r#"{"type": "long", "logicalType": "timestamp-micros"}"#,
            LogicalKind::TimestampMicros,
        ),
        (
            r#"{"type": "fixed", "size": 12, "logicalType": "duration"}"#,
            LogicalKind::Duration,
        ),
    ];

    for (json, kind) in cases {
        let schema = parse_schema(json).unwrap();
        assert!(
            matches!(schema, Schema::Logical(k) if k == kind),
            "{} decoded to {:?}",
            json,
            schema
        );
    }
}

#[test]
fn test_decode_unknown_logical_type() {
    let err = decode(br#"{"type":"int","logicalType":"nanosecond"}"#).unwrap_err();
    assert!(matches!(err, SchemaError::UnknownLogicalType(ref t) if t == "nanosecond"));
    assert_eq!(err.to_string(), "avroschema: unknown logical type nanosecond");
}

#[test]
fn test_decode_decimal() {
    let schema =
        parse_schema(r#"{"type": "bytes", "logicalType": "decimal", "precision": 9, "scale": 2}"#)
            .unwrap();
    assert_eq!(schema, Schema::Decimal(DecimalSchema::new(9, 2)));
    assert_eq!(schema.type_name(), "decimal");
}

// ============================================================================
// Decoder Tests - Complex Types
// ============================================================================

#[test]
fn test_decode_record_with_attributes() {
    let json = r#"{
        "type": "record",
        "name": "User",
        "namespace": "com.example",
        "doc": "A user record",
        "aliases": ["Person"],
        "fields": [
            {"name": "id", "type": "long", "doc": "primary key"},
            {"name": "count", "type": "int", "default": 0, "order": "descending"},
            {"name": "nick", "type": ["null", "string"], "default": null, "aliases": ["alias"]}
        ]
    }"#;

    let Schema::Record(r) = parse_schema(json).unwrap() else {
        panic!("Expected Record schema");
    };
    assert_eq!(r.name, "User");
    assert_eq!(r.namespace.as_deref(), Some("com.example"));
    assert_eq!(r.fullname(), "com.example.User");
    assert_eq!(r.doc.as_deref(), Some("A user record"));
    assert_eq!(r.aliases, vec!["Person".to_string()]);

    assert_eq!(r.fields[0].doc.as_deref(), Some("primary key"));
    assert_eq!(r.fields[1].default, Some(json!(0)));
    assert_eq!(r.fields[1].order, FieldOrder::Descending);
    assert_eq!(r.fields[2].default, Some(serde_json::Value::Null));
    assert_eq!(r.fields[2].aliases, vec!["alias".to_string()]);
    assert!(r.fields[2].schema.is_nullable());
}

#[test]
fn test_decode_nested_record() {
    let json = r#"{
        "type": "record",
        "name": "Person",
        "fields": [
            {"name": "name", "type": "string"},
            {
                "name": "address",
                "type": {
                    "type": "record",
                    "name": "Address",
                    "fields": [
                        {"name": "street", "type": "string"},
                        {"name": "tags", "type": {"type": "array", "items": "string"}}
                    ]
                }
            }
        ]
    }"#;

    let Schema::Record(person) = parse_schema(json).unwrap() else {
        panic!("Expected Record schema");
    };
    let address = &person.field("address").unwrap().schema;
    let Schema::Record(address) = address else {
        panic!("Expected nested Record schema");
    };
    assert_eq!(address.name, "Address");
    assert_eq!(address.fields[1].schema, Schema::array(Schema::string()));
}

#[test]
fn test_decode_enum() {
    let json = r#"{"type": "enum", "name": "Suit", "namespace": "cards",
                   "symbols": ["SPADES", "HEARTS", "DIAMONDS", "CLUBS"]}"#;
    let Schema::Enum(e) = parse_schema(json).unwrap() else {
        panic!("Expected Enum schema");
    };
    assert_eq!(e.fullname(), "cards.Suit");
    assert_eq!(e.symbols.len(), 4);
    assert_eq!(e.symbol_index("DIAMONDS"), Some(2));
}

#[test]
fn test_decode_array_and_map() {
    assert_eq!(
        parse_schema(r#"{"type": "array", "items": "long"}"#).unwrap(),
        Schema::array(Schema::long())
    );
    assert_eq!(
        parse_schema(r#"{"type": "map", "values": {"type": "array", "items": "int"}}"#).unwrap(),
        Schema::map(Schema::array(Schema::int()))
    );
}

#[test]
fn test_decode_fixed() {
    let mut fixed = FixedSchema::default();
    decode_into(
        br#"{"type": "fixed", "name": "md5", "namespace": "org.example", "size": 16}"#,
        &mut fixed,
    )
    .unwrap();
    assert_eq!(fixed, FixedSchema::new("md5", 16).with_namespace("org.example"));
}

#[test]
fn test_decode_union_preserves_order() {
    let Schema::Union(members) = parse_schema(r#"["string", "null", "int"]"#).unwrap() else {
        panic!("Expected Union schema");
    };
    let names: Vec<&str> = members.iter().map(Schema::type_name).collect();
    assert_eq!(names, vec!["string", "null", "int"]);
}

#[test]
fn test_decode_nested_union() {
    let schema = parse_schema(r#"["null", ["int", "long"]]"#).unwrap();
    assert_eq!(
        schema,
        Schema::union([
            Schema::null(),
            Schema::union([Schema::int(), Schema::long()])
        ])
    );
    assert_eq!(round_trip(&schema), schema);
}

#[test]
fn test_decode_unknown_primitive_name_is_kept() {
    let schema = parse_schema(r#""Address""#).unwrap();
    let Schema::Primitive(p) = &schema else {
        panic!("Expected Primitive schema");
    };
    assert!(!p.is_known());
    assert_eq!(schema.to_json(), r#""Address""#);
}

#[test]
fn test_decode_error_inside_nested_schema() {
    let json = r#"{"type": "record", "name": "r", "fields": [
        {"name": "a", "type": {"type": "map", "values": {"type": "long", "logicalType": "nanos"}}}
    ]}"#;
    assert!(matches!(
        parse_schema(json),
        Err(SchemaError::UnknownLogicalType(ref t)) if t == "nanos"
    ));
}

#[test]
fn test_decode_unrecognized_input() {
    let err = decode(b"  true ").unwrap_err();
    assert!(matches!(err, SchemaError::Unrecognized(ref raw) if raw == "true"));
}

// ============================================================================
// Encoder Tests
// ============================================================================

#[test]
fn test_encode_key_order() {
    let record = Schema::Record(
        RecordSchema::new("r", vec![FieldSchema::new("a", Schema::int())]).with_namespace("ns"),
    );
    assert_eq!(
        String::from_utf8(encode(&record).unwrap()).unwrap(),
        r#"{"type":"record","name":"r","namespace":"ns","fields":[{"name":"a","type":"int"}]}"#
    );
}

#[test]
fn test_encode_decimal_and_fixed_round_trip() {
    let decimal = Schema::Decimal(DecimalSchema::new(38, 10));
    assert_eq!(round_trip(&decimal), decimal);

    let fixed = Schema::Fixed(
        FixedSchema::new("hash", 32)
            .with_namespace("org.example")
            .with_aliases(vec!["Hash".to_string()]),
    );
    let decoded = round_trip(&fixed);
    assert_eq!(decoded, fixed);
    let Schema::Fixed(f) = decoded else {
        panic!("Expected Fixed schema");
    };
    assert_eq!(f.aliases, vec!["Hash".to_string()]);
}

#[test]
fn test_encode_preserves_field_metadata() {
    let record = RecordSchema::new(
        "Config",
        vec![FieldSchema::new("retries", Schema::int())
            .with_doc("retry budget")
            .with_default(json!(3))
            .with_aliases(vec!["attempts".to_string()])
            .with_order(FieldOrder::Ignore)],
    )
    .with_doc("settings");

    let Schema::Record(decoded) = round_trip(&Schema::Record(record)) else {
        panic!("Expected Record schema");
    };
    let field = &decoded.fields[0];
    assert_eq!(decoded.doc.as_deref(), Some("settings"));
    assert_eq!(field.doc.as_deref(), Some("retry budget"));
    assert_eq!(field.default, Some(json!(3)));
    assert_eq!(field.aliases, vec!["attempts".to_string()]);
    assert_eq!(field.order, FieldOrder::Ignore);
}

#[test]
fn test_encode_every_variant_round_trips() {
    let schemas = vec![
        Schema::null(),
        Schema::boolean(),
        Schema::int(),
        Schema::long(),
        Schema::float(),
        Schema::double(),
        Schema::bytes(),
        Schema::string(),
        Schema::Logical(LogicalKind::Date),
        Schema::Logical(LogicalKind::TimeMillis),
        Schema::Logical(LogicalKind::TimeMicros),
        Schema::Logical(LogicalKind::TimestampMillis),
        Schema::Logical(LogicalKind::TimestampMicros),
        Schema::Logical(LogicalKind::Duration),
        Schema::Decimal(DecimalSchema::new(5, 0)),
        Schema::Enum(EnumSchema::new("e", ["A"]).with_doc("letters")),
        Schema::Fixed(FixedSchema::new("f", 0)),
        Schema::array(Schema::map(Schema::bytes())),
        Schema::Union(Vec::new()),
        participant(),
    ];

    for schema in schemas {
        let decoded = round_trip(&schema);
        assert_eq!(decoded, schema, "round trip of {}", schema);
        assert_eq!(decoded.to_json(), schema.to_json());
    }
}

// ============================================================================
// Equality Tests
// ============================================================================

#[test]
fn test_equal_union_order_sensitivity() {
    let a = Schema::union([Schema::null(), Schema::string()]);
    let b = Schema::union([Schema::string(), Schema::null()]);
    assert!(!equal(&a, &b));
    assert!(contains(&a, &Schema::string()));
    assert!(contains(&b, &Schema::string()));
    assert!(contains(&a, &Schema::null()));
    assert!(contains(&b, &Schema::null()));
}

#[test]
fn test_equal_decimal_identity() {
    let d92 = Schema::Decimal(DecimalSchema::new(9, 2));
    assert!(equal(&d92, &Schema::Decimal(DecimalSchema::new(9, 2))));
    assert!(!equal(&d92, &Schema::Decimal(DecimalSchema::new(9, 3))));
}

#[test]
fn test_union_contains_decimal() {
    let u = Schema::union([
        Schema::null(),
        Schema::Decimal(DecimalSchema::new(1, 2)),
        Schema::string(),
    ]);
    assert!(u.contains(&Schema::null()));
    assert!(u.contains(&Schema::Decimal(DecimalSchema::new(1, 2))));
    assert!(u.contains(&Schema::string()));
    assert!(!u.contains(&Schema::Decimal(DecimalSchema::new(1, 3))));
}

#[test]
fn test_equal_fields_ignore_metadata() {
    let plain = Schema::Record(RecordSchema::new(
        "r",
        vec![FieldSchema::new("x", Schema::long())],
    ));
    let annotated = Schema::Record(RecordSchema::new(
        "r",
        vec![FieldSchema::new("x", Schema::long())
            .with_doc("described")
            .with_default(json!(7))
            .with_order(FieldOrder::Descending)],
    ));
    assert!(equal(&plain, &annotated));
    assert!(equal(&annotated, &plain));
}

#[test]
fn test_equal_named_types_compare_namespace() {
    let a = Schema::Enum(EnumSchema::new("sex", ["M", "F"]).with_namespace("a"));
    let b = Schema::Enum(EnumSchema::new("sex", ["M", "F"]).with_namespace("b"));
    assert!(!equal(&a, &b));

    let u = Schema::union([Schema::null(), a.clone()]);
    assert!(contains(&u, &a));
    assert!(!contains(&u, &b));
}

// ============================================================================
// Parser Configuration Tests
// ============================================================================

#[test]
fn test_strict_parser_accepts_canonical_output() {
    let parser = SchemaParser::new_strict();
    let bytes = encode(&participant()).unwrap();
    let schema = parser.decode(&bytes).unwrap().unwrap();
    assert_eq!(schema, participant());
}

#[test]
fn test_parser_configuration_accessors() {
    let parser = SchemaParser::new();
    assert!(!parser.is_strict());
    assert_eq!(parser.max_depth(), DEFAULT_MAX_DEPTH);

    let parser = parser.with_strict(true).with_max_depth(8);
    assert!(parser.is_strict());
    assert_eq!(parser.max_depth(), 8);
}

fn nested_records(depth: usize) -> Schema {
    let mut schema = Schema::int();
    for level in 0..depth {
        schema = Schema::Record(RecordSchema::new(
            format!("r{}", level),
            vec![FieldSchema::new("inner", schema)],
        ));
    }
    schema
}

#[test]
fn test_deeply_nested_records_round_trip() {
    // Each record opens three JSON levels, well past serde_json's own limit.
    let schema = nested_records(60);
    assert_eq!(round_trip(&schema), schema);
}

#[test]
fn test_depth_limit_on_deeply_nested_records() {
    let bytes = encode(&nested_records(60)).unwrap();
    assert!(SchemaParser::new().with_max_depth(60).decode(&bytes).is_ok());
    assert!(matches!(
        SchemaParser::new().with_max_depth(40).decode(&bytes),
        Err(SchemaError::DepthLimitExceeded(40))
    ));
}

#[test]
fn test_max_depth_above_json_default_limit() {
    let mut schema = Schema::int();
    for _ in 0..200 {
        schema = Schema::array(schema);
    }
    let bytes = encode(&schema).unwrap();

    let decoded = SchemaParser::new()
        .with_max_depth(1000)
        .decode(&bytes)
        .unwrap()
        .unwrap();
    assert_eq!(decoded, schema);

    assert!(matches!(
        SchemaParser::new().decode(&bytes),
        Err(SchemaError::DepthLimitExceeded(avroschema::DEFAULT_MAX_DEPTH))
    ));
}

#[test]
fn test_unknown_field_order_normalizes_to_ascending() {
    let json = br#"{"type":"record","name":"r","fields":[
        {"name":"a","type":"int","order":"sideways"}
    ]}"#;
    let schema = decode(json).unwrap().unwrap();
    let Schema::Record(record) = &schema else {
        panic!("expected record, got {}", schema);
    };
    assert_eq!(record.fields[0].order, FieldOrder::Ascending);
    assert_eq!(
        String::from_utf8(encode(&schema).unwrap()).unwrap(),
        r#"{"type":"record","name":"r","fields":[{"name":"a","type":"int"}]}"#
    );
}

#[test]
fn test_depth_limit_on_deep_union_nesting() {
    let mut json = String::from(r#""int""#);
    for _ in 0..10 {
        json = format!("[{}]", json);
    }

    assert!(SchemaParser::new().parse_str(&json).is_ok());
    assert!(matches!(
        SchemaParser::new().with_max_depth(5).parse_str(&json),
        Err(SchemaError::DepthLimitExceeded(5))
    ));
}
