//! # recordbridge - Typed Field Codec for Host Dataflow Tools
//!
//! recordbridge lets custom data-processing tools participate in a host
//! dataflow engine's binary record-streaming protocol. Records flow between
//! tools as fixed-layout byte buffers described by a per-stream schema; tools
//! read and write individual field values in place, without re-parsing the
//! whole buffer.
//!
//! ## Quick Start
//!
//! ```ignore
//! use recordbridge::{FieldDescriptor, FieldType, OutgoingRecord, Schema};
//!
//! let schema = Schema::new(vec![
//!     FieldDescriptor::new("Name", FieldType::FixedString).with_size(10),
//!     FieldDescriptor::new("Age", FieldType::Int16),
//!     FieldDescriptor::new("Notes", FieldType::VarString).with_size(255),
//! ])?;
//!
//! let mut record = OutgoingRecord::new(&schema);
//! record.string_field("Name")?.set("Bob")?;
//! record.int_field("Age")?.set(42)?;
//! record.string_field("Notes")?.set_null()?;
//! let blob = record.to_blob();
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │  Output Connection (stream lifecycle)│
//! ├─────────────────────────────────────┤
//! │  Typed Accessor Facade (handles)     │
//! ├─────────────────────────────────────┤
//! │  Field Codec (byte encode/decode)    │
//! ├─────────────────────────────────────┤
//! │  Schema & Layout (offsets, widths)   │
//! ├─────────────────────────────────────┤
//! │  Logical Types (wire width table)    │
//! └─────────────────────────────────────┘
//! ```
//!
//! ## Wire Contract
//!
//! The record's fixed-width region is the concatenation, in schema order, of
//! each fixed field's `(value bytes, null marker byte)`; variable-length
//! fields live out-of-line with a leading marker byte and are appended after
//! the fixed prefix. Null markers are `0` = not null, `1` = null, with Bool
//! overloading its single value byte (`0` false, `1` true, `2` null). The
//! schema itself is exchanged with the host as an XML metadata document at
//! stream-open time.
//!
//! ## Module Map
//!
//! - [`types`]: the sixteen logical field types and the per-type width table
//! - [`schema`]: field descriptors, layout computation, wire XML
//! - [`record`]: record construction, field codec, typed accessors
//! - [`connection`]: output stream lifecycle and progress reporting
//! - [`env`]: host environment discovery surface
//! - [`config`]: wire-format and throttling constants
//! - [`error`]: the crate-wide error type

pub mod config;
pub mod connection;
pub mod env;
pub mod error;
pub mod record;
pub mod schema;
pub mod types;

pub use connection::{HostReporter, OutputConnection, RecordSink};
pub use env::{decimal_separator_for, Environment, TestEnvironment};
pub use error::{RecordError, Result};
pub use record::OutgoingRecord;
pub use schema::{FieldDescriptor, Schema};
pub use types::{Capability, FieldType};
