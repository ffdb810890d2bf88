//! # Typed Accessor Facade
//!
//! Resolves a field by name and capability group into a handle exposing
//! exactly the get/set/set-null operations legal for that group. Ill-typed
//! access is unrepresentable: a handle for the wrong group cannot be
//! constructed, and resolution reports [`RecordError::UnknownField`] or
//! [`RecordError::CapabilityMismatch`] instead.
//!
//! Every `set` clears the null flag; `set_null` leaves fixed value bytes
//! untouched and flips the marker (for variable-length fields, byte 0 of the
//! out-of-line buffer). `get_current` returns `(value, is_null)`; the value
//! component of a null field is an unspecified default.
//!
//! Malformed fixed-decimal or date text is recovered as a zero value by
//! `get_current`, with the decode failure logged at `warn`; the `try_get`
//! variants expose the underlying [`RecordError::DecodeFailure`] for callers
//! that want to propagate it.

use chrono::NaiveDateTime;
use tracing::warn;

use super::codec;
use super::OutgoingRecord;
use crate::error::{RecordError, Result};
use crate::schema::FieldDescriptor;
use crate::types::{Capability, FieldType};

/// Exclusive view of one resolved field's descriptor and byte buffer.
#[derive(Debug)]
struct FieldMut<'r> {
    desc: &'r FieldDescriptor,
    separator: char,
    buf: &'r mut Vec<u8>,
}

impl FieldMut<'_> {
    fn value_region(&self) -> &[u8] {
        let size = self
            .desc
            .field_type()
            .value_size(self.desc.size())
            .unwrap_or(0);
        &self.buf[..size.min(self.buf.len())]
    }

    fn value_region_mut(&mut self) -> &mut [u8] {
        let size = self
            .desc
            .field_type()
            .value_size(self.desc.size())
            .unwrap_or(0);
        let end = size.min(self.buf.len());
        &mut self.buf[..end]
    }

    fn set_nullness(&mut self, null: bool) -> Result<()> {
        let offset = self
            .desc
            .field_type()
            .null_marker_offset(self.desc.size())
            .unwrap_or(0);
        if offset >= self.buf.len() {
            return Err(RecordError::BufferTooSmall {
                needed: offset + 1,
                actual: self.buf.len(),
            });
        }
        self.buf[offset] = null as u8;
        Ok(())
    }

    fn is_null(&self) -> bool {
        let offset = self
            .desc
            .field_type()
            .null_marker_offset(self.desc.size())
            .unwrap_or(0);
        self.buf.get(offset).copied() == Some(1)
    }

    fn recover<T: Default>(&self, result: Result<T>) -> T {
        match result {
            Ok(v) => v,
            Err(err) => {
                warn!(field = self.desc.name(), %err, "recovered field decode failure");
                T::default()
            }
        }
    }
}

impl<'a> OutgoingRecord<'a> {
    fn resolve(&mut self, name: &str, capability: Capability) -> Result<FieldMut<'_>> {
        let idx = self
            .schema()
            .index_of(name)
            .ok_or_else(|| RecordError::UnknownField {
                name: name.to_string(),
            })?;
        let desc = &self.schema().fields()[idx];
        if desc.field_type().capability() != capability {
            return Err(RecordError::CapabilityMismatch {
                field: name.to_string(),
                requested: capability,
                actual: desc.field_type(),
            });
        }
        let separator = self.schema().decimal_separator();
        Ok(FieldMut {
            desc,
            separator,
            buf: &mut self.buffers[idx],
        })
    }

    /// Resolves a Bool field.
    pub fn bool_field(&mut self, name: &str) -> Result<BoolField<'_>> {
        Ok(BoolField(self.resolve(name, Capability::Bool)?))
    }

    /// Resolves a Byte, Int16, Int32, or Int64 field.
    pub fn int_field(&mut self, name: &str) -> Result<IntField<'_>> {
        Ok(IntField(self.resolve(name, Capability::Integer)?))
    }

    /// Resolves a Float32, Float64, or FixedDecimal field.
    pub fn float_field(&mut self, name: &str) -> Result<FloatField<'_>> {
        Ok(FloatField(self.resolve(name, Capability::Float)?))
    }

    /// Resolves a Date or DateTime field.
    pub fn datetime_field(&mut self, name: &str) -> Result<DateTimeField<'_>> {
        Ok(DateTimeField(self.resolve(name, Capability::DateTime)?))
    }

    /// Resolves a FixedString, FixedWideString, VarString, or VarWideString
    /// field.
    pub fn string_field(&mut self, name: &str) -> Result<StringField<'_>> {
        Ok(StringField(self.resolve(name, Capability::String)?))
    }

    /// Resolves a Blob or SpatialObject field.
    pub fn blob_field(&mut self, name: &str) -> Result<BlobField<'_>> {
        Ok(BlobField(self.resolve(name, Capability::Blob)?))
    }
}

/// Handle for Bool fields. The single value byte holds `0` = false,
/// `1` = true, `2` = null.
#[derive(Debug)]
pub struct BoolField<'r>(FieldMut<'r>);

impl BoolField<'_> {
    pub fn set(&mut self, value: bool) -> Result<()> {
        if self.0.buf.is_empty() {
            return Err(RecordError::BufferTooSmall {
                needed: 1,
                actual: 0,
            });
        }
        self.0.buf[0] = value as u8;
        Ok(())
    }

    pub fn set_null(&mut self) -> Result<()> {
        if self.0.buf.is_empty() {
            return Err(RecordError::BufferTooSmall {
                needed: 1,
                actual: 0,
            });
        }
        self.0.buf[0] = 2;
        Ok(())
    }

    pub fn get_current(&self) -> (bool, bool) {
        match self.0.buf.first().copied() {
            Some(2) | None => (false, true),
            Some(b) => (b == 1, false),
        }
    }
}

/// Handle for Byte, Int16, Int32, and Int64 fields.
#[derive(Debug)]
pub struct IntField<'r>(FieldMut<'r>);

impl IntField<'_> {
    pub fn set(&mut self, value: i64) -> Result<()> {
        let field_type = self.0.desc.field_type();
        let region = self.0.value_region_mut();
        match field_type {
            FieldType::Byte => codec::write_byte(region, value)?,
            FieldType::Int16 => codec::write_int16(region, value)?,
            FieldType::Int32 => codec::write_int32(region, value)?,
            FieldType::Int64 => codec::write_int64(region, value)?,
            _ => unreachable!("non-integer type behind integer handle"),
        }
        self.0.set_nullness(false)
    }

    pub fn set_null(&mut self) -> Result<()> {
        self.0.set_nullness(true)
    }

    pub fn get_current(&self) -> (i64, bool) {
        if self.0.is_null() {
            return (0, true);
        }
        let region = self.0.value_region();
        let value = match self.0.desc.field_type() {
            FieldType::Byte => codec::read_byte(region),
            FieldType::Int16 => codec::read_int16(region),
            FieldType::Int32 => codec::read_int32(region),
            FieldType::Int64 => codec::read_int64(region),
            _ => unreachable!("non-integer type behind integer handle"),
        };
        (self.0.recover(value), false)
    }
}

/// Handle for Float32, Float64, and FixedDecimal fields.
#[derive(Debug)]
pub struct FloatField<'r>(FieldMut<'r>);

impl FloatField<'_> {
    pub fn set(&mut self, value: f64) -> Result<()> {
        let field_type = self.0.desc.field_type();
        let scale = self.0.desc.scale();
        let separator = self.0.separator;
        let region = self.0.value_region_mut();
        match field_type {
            FieldType::Float32 => codec::write_float32(region, value)?,
            FieldType::Float64 => codec::write_float64(region, value)?,
            FieldType::FixedDecimal => {
                codec::write_fixed_decimal(region, value, scale, separator)?
            }
            _ => unreachable!("non-float type behind float handle"),
        }
        self.0.set_nullness(false)
    }

    pub fn set_null(&mut self) -> Result<()> {
        self.0.set_nullness(true)
    }

    /// `(value, is_null)`, recovering malformed decimal text as `0.0` with a
    /// logged warning.
    pub fn get_current(&self) -> (f64, bool) {
        match self.try_get_current() {
            Ok(pair) => pair,
            Err(err) => {
                warn!(field = self.0.desc.name(), %err, "recovered field decode failure");
                (0.0, false)
            }
        }
    }

    /// Like [`get_current`](Self::get_current) but propagating
    /// [`RecordError::DecodeFailure`] instead of recovering it.
    pub fn try_get_current(&self) -> Result<(f64, bool)> {
        if self.0.is_null() {
            return Ok((0.0, true));
        }
        let region = self.0.value_region();
        let value = match self.0.desc.field_type() {
            FieldType::Float32 => codec::read_float32(region)?,
            FieldType::Float64 => codec::read_float64(region)?,
            FieldType::FixedDecimal => codec::read_fixed_decimal(region, self.0.separator)?,
            _ => unreachable!("non-float type behind float handle"),
        };
        Ok((value, false))
    }
}

/// Handle for Date and DateTime fields.
#[derive(Debug)]
pub struct DateTimeField<'r>(FieldMut<'r>);

impl DateTimeField<'_> {
    pub fn set(&mut self, value: NaiveDateTime) -> Result<()> {
        let field_type = self.0.desc.field_type();
        let region = self.0.value_region_mut();
        match field_type {
            FieldType::Date => codec::write_date(region, value)?,
            FieldType::DateTime => codec::write_date_time(region, value)?,
            _ => unreachable!("non-datetime type behind datetime handle"),
        }
        self.0.set_nullness(false)
    }

    pub fn set_null(&mut self) -> Result<()> {
        self.0.set_nullness(true)
    }

    /// `(value, is_null)`, recovering malformed text as the zero datetime
    /// (Unix epoch) with a logged warning.
    pub fn get_current(&self) -> (NaiveDateTime, bool) {
        match self.try_get_current() {
            Ok(pair) => pair,
            Err(err) => {
                warn!(field = self.0.desc.name(), %err, "recovered field decode failure");
                (NaiveDateTime::default(), false)
            }
        }
    }

    /// Like [`get_current`](Self::get_current) but propagating
    /// [`RecordError::DecodeFailure`] instead of recovering it.
    pub fn try_get_current(&self) -> Result<(NaiveDateTime, bool)> {
        if self.0.is_null() {
            return Ok((NaiveDateTime::default(), true));
        }
        let region = self.0.value_region();
        let value = match self.0.desc.field_type() {
            FieldType::Date => codec::read_date(region)?,
            FieldType::DateTime => codec::read_date_time(region)?,
            _ => unreachable!("non-datetime type behind datetime handle"),
        };
        Ok((value, false))
    }
}

/// Handle for FixedString, FixedWideString, VarString, and VarWideString
/// fields.
#[derive(Debug)]
pub struct StringField<'r>(FieldMut<'r>);

impl StringField<'_> {
    pub fn set(&mut self, value: &str) -> Result<()> {
        match self.0.desc.field_type() {
            FieldType::FixedString => {
                let region = self.0.value_region_mut();
                codec::write_fixed_string(region, value)?;
            }
            FieldType::FixedWideString => {
                let capacity = self.0.desc.size();
                let region = self.0.value_region_mut();
                codec::write_fixed_wide_string(region, value, capacity)?;
            }
            FieldType::VarString => {
                codec::write_var_payload(self.0.buf, value.as_bytes());
            }
            FieldType::VarWideString => {
                let units = codec::encode_utf16_units(value, Some(self.0.desc.size()));
                codec::write_var_payload(self.0.buf, &codec::utf16_to_bytes(&units));
            }
            _ => unreachable!("non-string type behind string handle"),
        }
        self.0.set_nullness(false)
    }

    pub fn set_null(&mut self) -> Result<()> {
        self.0.set_nullness(true)
    }

    pub fn get_current(&self) -> (String, bool) {
        if self.0.is_null() {
            return (String::new(), true);
        }
        let value = match self.0.desc.field_type() {
            FieldType::FixedString => codec::read_fixed_string(self.0.value_region()),
            FieldType::FixedWideString => {
                let capacity = self.0.desc.size();
                self.0
                    .recover(codec::read_fixed_wide_string(self.0.value_region(), capacity))
            }
            FieldType::VarString => {
                String::from_utf8_lossy(codec::var_payload(self.0.buf)).into_owned()
            }
            FieldType::VarWideString => {
                String::from_utf16_lossy(&codec::bytes_to_utf16(codec::var_payload(self.0.buf)))
            }
            _ => unreachable!("non-string type behind string handle"),
        };
        (value, false)
    }
}

/// Handle for Blob and SpatialObject fields.
#[derive(Debug)]
pub struct BlobField<'r>(FieldMut<'r>);

impl BlobField<'_> {
    pub fn set(&mut self, value: &[u8]) -> Result<()> {
        codec::write_var_payload(self.0.buf, value);
        self.0.set_nullness(false)
    }

    pub fn set_null(&mut self) -> Result<()> {
        self.0.set_nullness(true)
    }

    pub fn get_current(&self) -> (Vec<u8>, bool) {
        if self.0.is_null() {
            return (Vec::new(), true);
        }
        (codec::var_payload(self.0.buf).to_vec(), false)
    }
}
