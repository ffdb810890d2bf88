//! # Logical Field Types
//!
//! This module provides the canonical [`FieldType`] enum used across schema
//! definitions, layout computation, and the field codec, together with the
//! per-type width table that defines the record wire format.
//!
//! ## Type Categories
//!
//! | Category | Types | Value Bytes | Null Marker |
//! |----------|-------|-------------|-------------|
//! | **Boolean** | Bool | 1 | folded into value byte (`2` = null) |
//! | **Integer** | Byte, Int16, Int32, Int64 | 1, 2, 4, 8 | +1 byte after value |
//! | **Float** | Float32, Float64 | 4, 8 | +1 byte after value |
//! | **Decimal** | FixedDecimal | declared size (ASCII) | +1 byte after value |
//! | **Date/Time** | Date, DateTime | 10, 19 (ASCII) | +1 byte after value |
//! | **Text** | FixedString, FixedWideString | size, size×2 | +1 byte after value |
//! | **Variable** | VarString, VarWideString, Blob, SpatialObject | out-of-line | byte 0 of out-of-line buffer |
//!
//! Fixed-width fields embed `value bytes + marker byte` directly in the
//! record's fixed region, in schema order. Variable-length fields consume no
//! fixed-region space; each lives in its own growable buffer whose first byte
//! is the null marker and whose payload starts at byte 1.
//!
//! ## Capability Groups
//!
//! Accessors are resolved per capability group, not per type, so one handle
//! covers e.g. all four integer widths:
//!
//! | Capability | Types |
//! |------------|-------|
//! | Bool | Bool |
//! | Integer | Byte, Int16, Int32, Int64 |
//! | Float | Float32, Float64, FixedDecimal |
//! | DateTime | Date, DateTime |
//! | String | FixedString, FixedWideString, VarString, VarWideString |
//! | Blob | Blob, SpatialObject |

use crate::config::{DATE_TIME_WIDTH, DATE_WIDTH};

/// Canonical logical type of a record field.
///
/// Uses `#[repr(u8)]` for a single-byte discriminant. Declared size and scale
/// live in `FieldDescriptor`, not in the enum.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Bool = 0,
    Byte = 1,
    Int16 = 2,
    Int32 = 3,
    Int64 = 4,
    Float32 = 5,
    Float64 = 6,
    FixedDecimal = 7,
    Date = 8,
    DateTime = 9,

    FixedString = 20,
    FixedWideString = 21,

    VarString = 30,
    VarWideString = 31,
    Blob = 32,
    SpatialObject = 33,
}

/// Accessor capability group of a field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Bool,
    Integer,
    Float,
    DateTime,
    String,
    Blob,
}

impl Capability {
    /// Short label used in capability-mismatch error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Capability::Bool => "Bool",
            Capability::Integer => "Int",
            Capability::Float => "Decimal",
            Capability::DateTime => "DateTime",
            Capability::String => "String",
            Capability::Blob => "Blob",
        }
    }
}

impl FieldType {
    /// All sixteen logical types, in wire-tag order.
    pub const ALL: [FieldType; 16] = [
        FieldType::Bool,
        FieldType::Byte,
        FieldType::Int16,
        FieldType::Int32,
        FieldType::Int64,
        FieldType::Float32,
        FieldType::Float64,
        FieldType::FixedDecimal,
        FieldType::Date,
        FieldType::DateTime,
        FieldType::FixedString,
        FieldType::FixedWideString,
        FieldType::VarString,
        FieldType::VarWideString,
        FieldType::Blob,
        FieldType::SpatialObject,
    ];

    /// The literal type tag exchanged with the host engine in schema XML.
    pub fn wire_tag(&self) -> &'static str {
        match self {
            FieldType::Bool => "Bool",
            FieldType::Byte => "Byte",
            FieldType::Int16 => "Int16",
            FieldType::Int32 => "Int32",
            FieldType::Int64 => "Int64",
            FieldType::Float32 => "Float32",
            FieldType::Float64 => "Float64",
            FieldType::FixedDecimal => "FixedDecimal",
            FieldType::Date => "Date",
            FieldType::DateTime => "DateTime",
            FieldType::FixedString => "FixedString",
            FieldType::FixedWideString => "FixedWideString",
            FieldType::VarString => "VarString",
            FieldType::VarWideString => "VarWideString",
            FieldType::Blob => "Blob",
            FieldType::SpatialObject => "SpatialObject",
        }
    }

    /// Parses a wire type tag back into a `FieldType`.
    pub fn from_wire_tag(tag: &str) -> Option<FieldType> {
        FieldType::ALL.iter().copied().find(|t| t.wire_tag() == tag)
    }

    /// Returns the embedded value byte count for fixed-width types, or `None`
    /// for variable-length types. `declared` is the descriptor's size: byte
    /// capacity for fixed strings, significant digits for FixedDecimal,
    /// UTF-16 code units for FixedWideString (doubled here).
    pub fn value_size(&self, declared: usize) -> Option<usize> {
        match self {
            FieldType::Bool | FieldType::Byte => Some(1),
            FieldType::Int16 => Some(2),
            FieldType::Int32 | FieldType::Float32 => Some(4),
            FieldType::Int64 | FieldType::Float64 => Some(8),
            FieldType::FixedDecimal | FieldType::FixedString => Some(declared),
            FieldType::Date => Some(DATE_WIDTH),
            FieldType::DateTime => Some(DATE_TIME_WIDTH),
            FieldType::FixedWideString => Some(declared * 2),
            FieldType::VarString
            | FieldType::VarWideString
            | FieldType::Blob
            | FieldType::SpatialObject => None,
        }
    }

    /// Total fixed-region width (value bytes + null marker), or `None` for
    /// variable-length types, which consume no fixed-region space.
    pub fn fixed_width(&self, declared: usize) -> Option<usize> {
        match self {
            FieldType::Bool => Some(1),
            _ => self.value_size(declared).map(|v| v + 1),
        }
    }

    /// Offset of the null marker byte inside the field's own byte region.
    ///
    /// `None` for Bool, whose single value byte doubles as the marker
    /// (`0` = false, `1` = true, `2` = null). Variable-length fields carry
    /// their marker as byte 0 of the out-of-line buffer; all other fixed
    /// types place it immediately after the value bytes.
    pub fn null_marker_offset(&self, declared: usize) -> Option<usize> {
        match self {
            FieldType::Bool => None,
            _ => Some(self.value_size(declared).unwrap_or(0)),
        }
    }

    pub fn is_variable(&self) -> bool {
        self.value_size(1).is_none()
    }

    /// Whether `Schema` construction requires a positive declared size.
    pub fn requires_declared_size(&self) -> bool {
        matches!(
            self,
            FieldType::FixedDecimal
                | FieldType::FixedString
                | FieldType::FixedWideString
                | FieldType::VarWideString
        )
    }

    /// Default declared size for types whose width is intrinsic, used when a
    /// descriptor is built without an explicit size.
    pub fn intrinsic_size(&self) -> Option<usize> {
        match self {
            FieldType::Bool | FieldType::Byte => Some(1),
            FieldType::Int16 => Some(2),
            FieldType::Int32 | FieldType::Float32 => Some(4),
            FieldType::Int64 | FieldType::Float64 => Some(8),
            FieldType::Date => Some(DATE_WIDTH),
            FieldType::DateTime => Some(DATE_TIME_WIDTH),
            _ => None,
        }
    }

    pub fn capability(&self) -> Capability {
        match self {
            FieldType::Bool => Capability::Bool,
            FieldType::Byte | FieldType::Int16 | FieldType::Int32 | FieldType::Int64 => {
                Capability::Integer
            }
            FieldType::Float32 | FieldType::Float64 | FieldType::FixedDecimal => Capability::Float,
            FieldType::Date | FieldType::DateTime => Capability::DateTime,
            FieldType::FixedString
            | FieldType::FixedWideString
            | FieldType::VarString
            | FieldType::VarWideString => Capability::String,
            FieldType::Blob | FieldType::SpatialObject => Capability::Blob,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_widths_match_wire_table() {
        assert_eq!(FieldType::Bool.fixed_width(1), Some(1));
        assert_eq!(FieldType::Byte.fixed_width(1), Some(2));
        assert_eq!(FieldType::Int16.fixed_width(2), Some(3));
        assert_eq!(FieldType::Int32.fixed_width(4), Some(5));
        assert_eq!(FieldType::Int64.fixed_width(8), Some(9));
        assert_eq!(FieldType::Float32.fixed_width(4), Some(5));
        assert_eq!(FieldType::Float64.fixed_width(8), Some(9));
        assert_eq!(FieldType::FixedDecimal.fixed_width(8), Some(9));
        assert_eq!(FieldType::Date.fixed_width(10), Some(11));
        assert_eq!(FieldType::DateTime.fixed_width(19), Some(20));
        assert_eq!(FieldType::FixedString.fixed_width(10), Some(11));
        assert_eq!(FieldType::FixedWideString.fixed_width(10), Some(21));
        assert_eq!(FieldType::VarString.fixed_width(100), None);
        assert_eq!(FieldType::VarWideString.fixed_width(100), None);
        assert_eq!(FieldType::Blob.fixed_width(100), None);
        assert_eq!(FieldType::SpatialObject.fixed_width(100), None);
    }

    #[test]
    fn wide_strings_place_marker_after_doubled_value_bytes() {
        assert_eq!(FieldType::FixedString.null_marker_offset(10), Some(10));
        assert_eq!(FieldType::FixedWideString.null_marker_offset(10), Some(20));
    }

    #[test]
    fn bool_folds_marker_into_value_byte() {
        assert_eq!(FieldType::Bool.null_marker_offset(1), None);
    }

    #[test]
    fn variable_types_use_leading_marker() {
        for ft in [
            FieldType::VarString,
            FieldType::VarWideString,
            FieldType::Blob,
            FieldType::SpatialObject,
        ] {
            assert!(ft.is_variable());
            assert_eq!(ft.null_marker_offset(100), Some(0));
        }
    }

    #[test]
    fn wire_tags_round_trip() {
        for ft in FieldType::ALL {
            assert_eq!(FieldType::from_wire_tag(ft.wire_tag()), Some(ft));
        }
        assert_eq!(FieldType::from_wire_tag("NotAType"), None);
    }

    #[test]
    fn capability_groups_cover_all_types() {
        assert_eq!(FieldType::Bool.capability(), Capability::Bool);
        assert_eq!(FieldType::Byte.capability(), Capability::Integer);
        assert_eq!(FieldType::Int64.capability(), Capability::Integer);
        assert_eq!(FieldType::FixedDecimal.capability(), Capability::Float);
        assert_eq!(FieldType::Date.capability(), Capability::DateTime);
        assert_eq!(FieldType::VarWideString.capability(), Capability::String);
        assert_eq!(FieldType::SpatialObject.capability(), Capability::Blob);
    }
}
