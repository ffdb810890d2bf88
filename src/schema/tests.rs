//! Tests for schema validation, layout computation, and wire serialization

use super::*;
use crate::types::FieldType;

#[test]
fn schema_computes_fixed_offsets_and_total_size() {
    let schema = Schema::new(vec![
        FieldDescriptor::new("a", FieldType::Int32),
        FieldDescriptor::new("b", FieldType::Int64),
        FieldDescriptor::new("c", FieldType::VarString).with_size(100),
        FieldDescriptor::new("d", FieldType::Int16),
    ])
    .unwrap();

    assert_eq!(schema.fixed_offset(0), 0);
    assert_eq!(schema.fixed_offset(1), 5);
    assert_eq!(schema.fixed_offset(2), 14);
    assert_eq!(schema.fixed_offset(3), 14);

    assert_eq!(schema.field_width(0), 5);
    assert_eq!(schema.field_width(1), 9);
    assert_eq!(schema.field_width(2), 0);
    assert_eq!(schema.field_width(3), 3);

    assert_eq!(schema.fixed_region_size(), 17);
}

#[test]
fn bool_and_int32_layout_is_six_bytes() {
    let schema = Schema::new(vec![
        FieldDescriptor::new("Flag", FieldType::Bool),
        FieldDescriptor::new("Count", FieldType::Int32),
    ])
    .unwrap();

    assert_eq!(schema.fixed_offset(0), 0);
    assert_eq!(schema.fixed_offset(1), 1);
    assert_eq!(schema.fixed_region_size(), 6);
}

#[test]
fn reordering_fields_changes_offsets_but_not_total_size() {
    let forward = Schema::new(vec![
        FieldDescriptor::new("a", FieldType::Bool),
        FieldDescriptor::new("b", FieldType::FixedString).with_size(10),
        FieldDescriptor::new("c", FieldType::Float64),
    ])
    .unwrap();
    let reversed = Schema::new(vec![
        FieldDescriptor::new("c", FieldType::Float64),
        FieldDescriptor::new("b", FieldType::FixedString).with_size(10),
        FieldDescriptor::new("a", FieldType::Bool),
    ])
    .unwrap();

    assert_eq!(forward.fixed_region_size(), reversed.fixed_region_size());
    assert_ne!(
        forward.fixed_offset(forward.index_of("a").unwrap()),
        reversed.fixed_offset(reversed.index_of("a").unwrap())
    );
}

#[test]
fn wide_string_width_doubles_declared_size() {
    let schema = Schema::new(vec![
        FieldDescriptor::new("w", FieldType::FixedWideString).with_size(10)
    ])
    .unwrap();

    assert_eq!(schema.field_width(0), 21);
    assert_eq!(schema.fixed_region_size(), 21);
}

#[test]
fn date_and_datetime_widths_are_text_plus_marker() {
    let schema = Schema::new(vec![
        FieldDescriptor::new("d", FieldType::Date),
        FieldDescriptor::new("dt", FieldType::DateTime),
    ])
    .unwrap();

    assert_eq!(schema.field_width(0), 11);
    assert_eq!(schema.field_width(1), 20);
    assert_eq!(schema.fixed_region_size(), 31);
}

#[test]
fn schema_rejects_empty_field_name() {
    let err = Schema::new(vec![FieldDescriptor::new("", FieldType::Int32)]).unwrap_err();
    assert!(err.to_string().contains("empty name"));
}

#[test]
fn schema_rejects_duplicate_field_names() {
    let err = Schema::new(vec![
        FieldDescriptor::new("x", FieldType::Int32),
        FieldDescriptor::new("x", FieldType::Float64),
    ])
    .unwrap_err();
    assert!(err.to_string().contains("duplicate field name 'x'"));
}

#[test]
fn schema_rejects_missing_declared_size() {
    for ft in [
        FieldType::FixedDecimal,
        FieldType::FixedString,
        FieldType::FixedWideString,
        FieldType::VarWideString,
    ] {
        let err = Schema::new(vec![FieldDescriptor::new("x", ft)]).unwrap_err();
        assert!(err.to_string().contains("needs a declared size"), "{ft:?}");
    }
}

#[test]
fn descriptors_default_to_intrinsic_sizes() {
    let schema = Schema::new(vec![
        FieldDescriptor::new("i", FieldType::Int16),
        FieldDescriptor::new("f", FieldType::Float32),
        FieldDescriptor::new("d", FieldType::Date),
    ])
    .unwrap();

    assert_eq!(schema.field(0).unwrap().size(), 2);
    assert_eq!(schema.field(1).unwrap().size(), 4);
    assert_eq!(schema.field(2).unwrap().size(), 10);
}

#[test]
fn wire_xml_wraps_fields_with_connection_label() {
    let schema = Schema::new(vec![
        FieldDescriptor::new("Age", FieldType::Int16).with_source("input.csv"),
        FieldDescriptor::new("Price", FieldType::FixedDecimal)
            .with_size(8)
            .with_scale(2),
    ])
    .unwrap();

    let xml = schema.to_wire_xml("Output");
    assert_eq!(
        xml,
        "<MetaInfo connection=\"Output\"><RecordInfo>\
         <Field name=\"Age\" type=\"Int16\" source=\"input.csv\" size=\"2\" scale=\"0\" />\
         <Field name=\"Price\" type=\"FixedDecimal\" source=\"\" size=\"8\" scale=\"2\" />\
         </RecordInfo></MetaInfo>"
    );
}

#[test]
fn wire_xml_preserves_declaration_order() {
    let schema = Schema::new(vec![
        FieldDescriptor::new("z", FieldType::Int32),
        FieldDescriptor::new("a", FieldType::Int32),
    ])
    .unwrap();

    let xml = schema.to_wire_xml("out");
    let z = xml.find("name=\"z\"").unwrap();
    let a = xml.find("name=\"a\"").unwrap();
    assert!(z < a);
}

#[test]
fn wire_xml_escapes_attribute_values() {
    let schema = Schema::new(vec![
        FieldDescriptor::new("a<b>&\"c\"", FieldType::Int32).with_source("x&y")
    ])
    .unwrap();

    let xml = schema.to_wire_xml("conn \"1\"");
    assert!(xml.contains("connection=\"conn &quot;1&quot;\""));
    assert!(xml.contains("name=\"a&lt;b&gt;&amp;&quot;c&quot;\""));
    assert!(xml.contains("source=\"x&amp;y\""));
}
