//! # Schema Wire Serialization
//!
//! Renders a [`Schema`] into the host engine's metadata exchange document,
//! announced once per output connection at stream-open time:
//!
//! ```text
//! <MetaInfo connection="Output">
//!   <RecordInfo>
//!     <Field name="Age" type="Int16" source="" size="2" scale="0" />
//!     ...
//!   </RecordInfo>
//! </MetaInfo>
//! ```
//!
//! The transformation is pure and order-preserving; descriptor metadata is
//! passed through untouched apart from XML attribute escaping.

use std::fmt::Write;

use super::Schema;

impl Schema {
    /// Serializes the field list for handshake with the host engine, with the
    /// stream's label as the `connection` attribute.
    pub fn to_wire_xml(&self, connection: &str) -> String {
        let mut out = String::with_capacity(64 + self.field_count() * 64);
        out.push_str("<MetaInfo connection=\"");
        escape_attr(connection, &mut out);
        out.push_str("\"><RecordInfo>");
        for field in self.fields() {
            out.push_str("<Field name=\"");
            escape_attr(field.name(), &mut out);
            out.push_str("\" type=\"");
            out.push_str(field.field_type().wire_tag());
            out.push_str("\" source=\"");
            escape_attr(field.source(), &mut out);
            // write! to a String cannot fail
            let _ = write!(out, "\" size=\"{}\" scale=\"{}\" />", field.size(), field.scale());
        }
        out.push_str("</RecordInfo></MetaInfo>");
        out
    }
}

fn escape_attr(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
}
