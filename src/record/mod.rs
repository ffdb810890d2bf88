//! # Outgoing Record Construction
//!
//! This module provides [`OutgoingRecord`], the mutable build-side of one
//! record, plus the capability-narrowed accessor handles in [`accessor`] and
//! the pure byte codec in [`codec`].
//!
//! ## Storage Model
//!
//! Each field owns one byte buffer:
//!
//! - **Fixed-width** fields hold `value bytes + null marker byte` at the
//!   exact width the schema layout assigns them; the buffer is embedded into
//!   the record's fixed region on assembly.
//! - **Variable-length** fields hold `null marker byte + payload` in a
//!   growable buffer that is reallocated on oversized writes and appended
//!   after the fixed region on assembly.
//!
//! ## Usage
//!
//! ```ignore
//! let schema = Schema::new(vec![
//!     FieldDescriptor::new("Age", FieldType::Int16),
//!     FieldDescriptor::new("Name", FieldType::VarString).with_size(255),
//! ])?;
//!
//! let mut record = OutgoingRecord::new(&schema);
//! record.int_field("Age")?.set(42)?;
//! record.string_field("Name")?.set("Alice")?;
//! let blob = record.to_blob();
//!
//! // Reuse the buffers for the next record
//! record.reset();
//! ```
//!
//! ## Ownership
//!
//! One producing thread owns an `OutgoingRecord` exclusively while building
//! it; [`to_blob`](OutgoingRecord::to_blob) produces the frozen byte image
//! handed downstream. A previously fetched variable-length value is invalid
//! after a subsequent set on the same field, which the borrow checker
//! enforces by returning owned values from getters and tying handles to
//! `&mut self`.

pub mod accessor;
pub(crate) mod codec;

pub use accessor::{BlobField, BoolField, DateTimeField, FloatField, IntField, StringField};

use crate::schema::Schema;

/// One record under construction: a per-field buffer set backed by a shared,
/// read-only [`Schema`].
pub struct OutgoingRecord<'a> {
    schema: &'a Schema,
    buffers: Vec<Vec<u8>>,
}

impl<'a> OutgoingRecord<'a> {
    /// Allocates zeroed buffers for every field. All fields start non-null
    /// with zero values (empty payloads for variable-length fields).
    pub fn new(schema: &'a Schema) -> Self {
        let buffers = (0..schema.field_count())
            .map(|idx| {
                let width = schema.field_width(idx);
                if width == 0 {
                    vec![0u8; 1]
                } else {
                    vec![0u8; width]
                }
            })
            .collect();
        Self { schema, buffers }
    }

    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    /// Raw byte region of one field, value and marker included. Mainly for
    /// tests and blob assembly; typed access goes through the accessors.
    pub fn field_bytes(&self, idx: usize) -> &[u8] {
        &self.buffers[idx]
    }

    /// Total wire size of the record in its current state: the fixed region
    /// plus every out-of-line buffer.
    pub fn total_size(&self) -> usize {
        let var_bytes: usize = self
            .schema
            .fields()
            .iter()
            .zip(&self.buffers)
            .filter(|(f, _)| f.field_type().is_variable())
            .map(|(_, b)| b.len())
            .sum();
        self.schema.fixed_region_size() + var_bytes
    }

    /// Assembles the frozen record image: fixed-width field regions
    /// concatenated in schema order, followed by the out-of-line buffers of
    /// variable-length fields in schema order.
    pub fn to_blob(&self) -> Vec<u8> {
        let mut blob = vec![0u8; self.schema.fixed_region_size()];
        for (idx, field) in self.schema.fields().iter().enumerate() {
            if field.field_type().is_variable() {
                continue;
            }
            let offset = self.schema.fixed_offset(idx);
            let width = self.schema.field_width(idx);
            blob[offset..offset + width].copy_from_slice(&self.buffers[idx]);
        }
        for (idx, field) in self.schema.fields().iter().enumerate() {
            if field.field_type().is_variable() {
                blob.extend_from_slice(&self.buffers[idx]);
            }
        }
        blob
    }

    /// Returns all fields to their initial non-null zero state, keeping the
    /// fixed allocations for reuse.
    pub fn reset(&mut self) {
        for (idx, buf) in self.buffers.iter_mut().enumerate() {
            let width = self.schema.field_width(idx);
            if width == 0 {
                buf.clear();
                buf.push(0);
            } else {
                buf.fill(0);
            }
        }
    }
}
