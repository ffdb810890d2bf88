//! # Field Codec
//!
//! Pure encode/decode functions between typed values and raw field byte
//! regions. Each function operates on exactly the slice the layout table in
//! [`crate::types`] assigns to the field's value bytes; null markers are
//! handled by the accessor layer, not here.
//!
//! Encodings:
//!
//! - integers: little-endian two's-complement (`Byte` is unsigned)
//! - floats: little-endian IEEE-754
//! - fixed decimal: left-trimmed ASCII fixed-point text, NUL-terminated when
//!   shorter than the region, truncated when longer
//! - date / datetime: fixed-width ASCII text
//! - fixed strings: truncated to capacity, single (wide) NUL terminator when
//!   shorter, trailing bytes left untouched
//! - variable payloads: out-of-line buffer of exactly `payload + 1` bytes,
//!   byte 0 reserved for the null marker
//!
//! Undersized regions return [`RecordError::BufferTooSmall`]; malformed text
//! returns [`RecordError::DecodeFailure`]. Nothing here panics on bad bytes.

use chrono::{NaiveDate, NaiveDateTime};
use smallvec::SmallVec;

use crate::config::{DATE_FORMAT, DATE_TIME_FORMAT, DATE_TIME_WIDTH, DATE_WIDTH};
use crate::error::{RecordError, Result};

/// UTF-16 scratch buffer; stack-allocated for typical short field values.
type Utf16Buf = SmallVec<[u16; 32]>;

fn ensure_len(buf: &[u8], needed: usize) -> Result<()> {
    if buf.len() < needed {
        return Err(RecordError::BufferTooSmall {
            needed,
            actual: buf.len(),
        });
    }
    Ok(())
}

fn decode_failure(bytes: &[u8], reason: impl ToString) -> RecordError {
    RecordError::DecodeFailure {
        text: String::from_utf8_lossy(bytes).into_owned(),
        reason: reason.to_string(),
    }
}

/// Bytes up to the first NUL, or the whole slice if none.
pub(crate) fn truncate_at_nul(buf: &[u8]) -> &[u8] {
    match buf.iter().position(|&b| b == 0) {
        Some(n) => &buf[..n],
        None => buf,
    }
}

pub(crate) fn read_byte(buf: &[u8]) -> Result<i64> {
    ensure_len(buf, 1)?;
    Ok(buf[0] as i64)
}

pub(crate) fn write_byte(buf: &mut [u8], value: i64) -> Result<()> {
    ensure_len(buf, 1)?;
    buf[0] = value as u8;
    Ok(())
}

pub(crate) fn read_int16(buf: &[u8]) -> Result<i64> {
    ensure_len(buf, 2)?;
    Ok(i16::from_le_bytes([buf[0], buf[1]]) as i64)
}

pub(crate) fn write_int16(buf: &mut [u8], value: i64) -> Result<()> {
    ensure_len(buf, 2)?;
    buf[..2].copy_from_slice(&(value as i16).to_le_bytes());
    Ok(())
}

pub(crate) fn read_int32(buf: &[u8]) -> Result<i64> {
    ensure_len(buf, 4)?;
    Ok(i32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]) as i64)
}

pub(crate) fn write_int32(buf: &mut [u8], value: i64) -> Result<()> {
    ensure_len(buf, 4)?;
    buf[..4].copy_from_slice(&(value as i32).to_le_bytes());
    Ok(())
}

pub(crate) fn read_int64(buf: &[u8]) -> Result<i64> {
    ensure_len(buf, 8)?;
    let bytes: [u8; 8] = buf[..8].try_into().map_err(|_| RecordError::BufferTooSmall {
        needed: 8,
        actual: buf.len(),
    })?;
    Ok(i64::from_le_bytes(bytes))
}

pub(crate) fn write_int64(buf: &mut [u8], value: i64) -> Result<()> {
    ensure_len(buf, 8)?;
    buf[..8].copy_from_slice(&value.to_le_bytes());
    Ok(())
}

pub(crate) fn read_float32(buf: &[u8]) -> Result<f64> {
    ensure_len(buf, 4)?;
    Ok(f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]) as f64)
}

pub(crate) fn write_float32(buf: &mut [u8], value: f64) -> Result<()> {
    ensure_len(buf, 4)?;
    buf[..4].copy_from_slice(&(value as f32).to_le_bytes());
    Ok(())
}

pub(crate) fn read_float64(buf: &[u8]) -> Result<f64> {
    ensure_len(buf, 8)?;
    let bytes: [u8; 8] = buf[..8].try_into().map_err(|_| RecordError::BufferTooSmall {
        needed: 8,
        actual: buf.len(),
    })?;
    Ok(f64::from_le_bytes(bytes))
}

pub(crate) fn write_float64(buf: &mut [u8], value: f64) -> Result<()> {
    ensure_len(buf, 8)?;
    buf[..8].copy_from_slice(&value.to_le_bytes());
    Ok(())
}

/// Formats `value` as fixed-point text with `scale` decimal places and the
/// given separator, truncated to the region width, NUL-terminated when
/// shorter. The region width is the field's declared size.
pub(crate) fn write_fixed_decimal(
    buf: &mut [u8],
    value: f64,
    scale: usize,
    separator: char,
) -> Result<()> {
    ensure_len(buf, 1)?;
    let mut text = format!("{value:.scale$}");
    if separator != '.' {
        text = text.replace('.', separator.encode_utf8(&mut [0u8; 4]));
    }
    let bytes = text.as_bytes();
    let n = bytes.len().min(buf.len());
    buf[..n].copy_from_slice(&bytes[..n]);
    if n < buf.len() {
        buf[n] = 0;
    }
    Ok(())
}

/// Parses the region's text up to the first NUL as an `f64`.
pub(crate) fn read_fixed_decimal(buf: &[u8], separator: char) -> Result<f64> {
    let raw = truncate_at_nul(buf);
    let text = std::str::from_utf8(raw).map_err(|e| decode_failure(raw, e))?;
    let text = if separator != '.' {
        text.replace(separator, ".")
    } else {
        text.to_string()
    };
    text.trim()
        .parse::<f64>()
        .map_err(|e| decode_failure(raw, e))
}

pub(crate) fn write_date(buf: &mut [u8], value: NaiveDateTime) -> Result<()> {
    ensure_len(buf, DATE_WIDTH)?;
    write_formatted(buf, &value.format(DATE_FORMAT).to_string())
}

pub(crate) fn read_date(buf: &[u8]) -> Result<NaiveDateTime> {
    ensure_len(buf, DATE_WIDTH)?;
    let raw = &buf[..DATE_WIDTH];
    let text = std::str::from_utf8(raw).map_err(|e| decode_failure(raw, e))?;
    let date = NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|e| decode_failure(raw, e))?;
    Ok(date.and_time(chrono::NaiveTime::MIN))
}

pub(crate) fn write_date_time(buf: &mut [u8], value: NaiveDateTime) -> Result<()> {
    ensure_len(buf, DATE_TIME_WIDTH)?;
    write_formatted(buf, &value.format(DATE_TIME_FORMAT).to_string())
}

pub(crate) fn read_date_time(buf: &[u8]) -> Result<NaiveDateTime> {
    ensure_len(buf, DATE_TIME_WIDTH)?;
    let raw = &buf[..DATE_TIME_WIDTH];
    let text = std::str::from_utf8(raw).map_err(|e| decode_failure(raw, e))?;
    NaiveDateTime::parse_from_str(text, DATE_TIME_FORMAT).map_err(|e| decode_failure(raw, e))
}

fn write_formatted(buf: &mut [u8], text: &str) -> Result<()> {
    let bytes = text.as_bytes();
    let n = bytes.len().min(buf.len());
    buf[..n].copy_from_slice(&bytes[..n]);
    Ok(())
}

/// Writes a byte string into a fixed region: truncated to capacity, followed
/// by a single NUL when shorter. Bytes after the terminator keep whatever
/// they already held.
pub(crate) fn write_fixed_string(buf: &mut [u8], value: &str) -> Result<()> {
    let bytes = value.as_bytes();
    let n = bytes.len().min(buf.len());
    buf[..n].copy_from_slice(&bytes[..n]);
    if n < buf.len() {
        buf[n] = 0;
    }
    Ok(())
}

pub(crate) fn read_fixed_string(buf: &[u8]) -> String {
    String::from_utf8_lossy(truncate_at_nul(buf)).into_owned()
}

/// Writes UTF-16 code units into a fixed wide region of `capacity` units,
/// truncated to capacity, with one zero unit appended when shorter.
pub(crate) fn write_fixed_wide_string(buf: &mut [u8], value: &str, capacity: usize) -> Result<()> {
    ensure_len(buf, capacity * 2)?;
    let mut units: Utf16Buf = value.encode_utf16().collect();
    if units.len() > capacity {
        units.truncate(capacity);
    } else if units.len() < capacity {
        units.push(0);
    }
    for (i, unit) in units.iter().enumerate() {
        buf[i * 2..i * 2 + 2].copy_from_slice(&unit.to_le_bytes());
    }
    Ok(())
}

pub(crate) fn read_fixed_wide_string(buf: &[u8], capacity: usize) -> Result<String> {
    ensure_len(buf, capacity * 2)?;
    let mut units = bytes_to_utf16(&buf[..capacity * 2]);
    if let Some(n) = units.iter().position(|&u| u == 0) {
        units.truncate(n);
    }
    Ok(String::from_utf16_lossy(&units))
}

/// Replaces the out-of-line buffer's payload. Reallocates to exactly
/// `payload.len() + 1` bytes when capacity is insufficient, copies the
/// payload starting at byte 1, and truncates the length to match. Byte 0 (the
/// null marker) is preserved across in-place rewrites and zeroed by a fresh
/// allocation; callers set it explicitly afterwards.
pub(crate) fn write_var_payload(buf: &mut Vec<u8>, payload: &[u8]) {
    let required = payload.len() + 1;
    if required > buf.capacity() {
        *buf = vec![0u8; required];
    } else {
        buf.resize(required, 0);
    }
    buf[1..].copy_from_slice(payload);
}

/// The payload bytes after the leading null marker. Valid only until the next
/// set on the same field, which may reallocate the buffer.
pub(crate) fn var_payload(buf: &[u8]) -> &[u8] {
    if buf.len() <= 1 {
        &[]
    } else {
        &buf[1..]
    }
}

pub(crate) fn encode_utf16_units(value: &str, max_units: Option<usize>) -> Utf16Buf {
    let mut units: Utf16Buf = value.encode_utf16().collect();
    if let Some(max) = max_units {
        if units.len() > max {
            units.truncate(max);
        }
    }
    units
}

pub(crate) fn utf16_to_bytes(units: &[u16]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(units.len() * 2);
    for unit in units {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    bytes
}

/// Little-endian byte pairs to UTF-16 code units; a trailing odd byte is
/// ignored.
pub(crate) fn bytes_to_utf16(buf: &[u8]) -> Utf16Buf {
    buf.chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect()
}
