//! # Schema Definition and Layout Computation
//!
//! A [`Schema`] is an ordered, immutable list of [`FieldDescriptor`]s plus the
//! pre-computed byte layout of a record's fixed-width region. Offsets are
//! computed once at construction so field access never re-derives layout.
//!
//! ## Schema Internals
//!
//! - `fields`: ordered field descriptors (wire order)
//! - `name_index`: field name -> index lookup
//! - `fixed_offsets`: byte offset of each field inside the fixed region
//! - `widths`: value+marker width of each field (0 for variable-length)
//! - `fixed_region_size`: total fixed-region byte count
//!
//! Variable-length fields consume no fixed-region space; their offsets are
//! recorded as the running offset at declaration position but their width is
//! zero, so reordering fields never changes the total size.
//!
//! A constructed `Schema` is read-only and can back any number of concurrent
//! record builds.

mod xml;
#[cfg(test)]
mod tests;

use hashbrown::HashMap;

use crate::error::{RecordError, Result};
use crate::types::FieldType;

/// Static metadata for one record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: String,
    field_type: FieldType,
    size: usize,
    scale: usize,
    source: String,
}

impl FieldDescriptor {
    /// Creates a descriptor with the type's intrinsic size where it has one.
    /// Types without an intrinsic size (strings, decimal, blobs) take theirs
    /// from [`with_size`](Self::with_size).
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            size: field_type.intrinsic_size().unwrap_or(0),
            scale: 0,
            source: String::new(),
        }
    }

    /// Declared size: byte capacity for fixed strings and blobs, UTF-16 code
    /// units for wide strings, significant digits for FixedDecimal.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Decimal places, FixedDecimal only.
    pub fn with_scale(mut self, scale: usize) -> Self {
        self.scale = scale;
        self
    }

    /// Opaque lineage tag passed through to the host unmodified.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn scale(&self) -> usize {
        self.scale
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Ordered field list with pre-computed record layout.
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<FieldDescriptor>,
    name_index: HashMap<String, usize>,
    fixed_offsets: Vec<usize>,
    widths: Vec<usize>,
    fixed_region_size: usize,
    decimal_separator: char,
}

impl Schema {
    /// Validates the descriptors and computes the fixed-region layout.
    ///
    /// Fails with [`RecordError::InvalidSchema`] on empty or duplicate names,
    /// or a missing declared size for a type that needs one.
    pub fn new(fields: Vec<FieldDescriptor>) -> Result<Self> {
        Self::with_decimal_separator(fields, '.')
    }

    /// Like [`new`](Self::new), with a locale-specific decimal separator for
    /// FixedDecimal text. See [`crate::env::decimal_separator_for`].
    pub fn with_decimal_separator(fields: Vec<FieldDescriptor>, separator: char) -> Result<Self> {
        let mut name_index = HashMap::with_capacity(fields.len());
        let mut fixed_offsets = Vec::with_capacity(fields.len());
        let mut widths = Vec::with_capacity(fields.len());
        let mut offset = 0;

        for (idx, field) in fields.iter().enumerate() {
            if field.name.is_empty() {
                return Err(RecordError::InvalidSchema {
                    reason: format!("field {idx} has an empty name"),
                });
            }
            if name_index.insert(field.name.clone(), idx).is_some() {
                return Err(RecordError::InvalidSchema {
                    reason: format!("duplicate field name '{}'", field.name),
                });
            }
            if field.field_type.requires_declared_size() && field.size == 0 {
                return Err(RecordError::InvalidSchema {
                    reason: format!(
                        "field '{}' of type {} needs a declared size",
                        field.name,
                        field.field_type.wire_tag()
                    ),
                });
            }

            fixed_offsets.push(offset);
            let width = field.field_type.fixed_width(field.size).unwrap_or(0);
            widths.push(width);
            offset += width;
        }

        Ok(Self {
            fields,
            name_index,
            fixed_offsets,
            widths,
            fixed_region_size: offset,
            decimal_separator: separator,
        })
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn field(&self, idx: usize) -> Option<&FieldDescriptor> {
        self.fields.get(idx)
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.name_index.get(name).copied()
    }

    /// Byte offset of the field inside the record's fixed region.
    pub fn fixed_offset(&self, idx: usize) -> usize {
        self.fixed_offsets[idx]
    }

    /// Value+marker width of the field; 0 for variable-length fields.
    pub fn field_width(&self, idx: usize) -> usize {
        self.widths[idx]
    }

    /// Total byte count of the fixed-width record region.
    pub fn fixed_region_size(&self) -> usize {
        self.fixed_region_size
    }

    pub fn decimal_separator(&self) -> char {
        self.decimal_separator
    }
}
