//! # Wire Format and Progress Constants
//!
//! Interdependent values are co-located and their relationships documented.
//! Changing any of these changes the byte contract with the host engine.
//!
//! ```text
//! DATE_FORMAT ("%Y-%m-%d")
//!       │
//!       └─> DATE_WIDTH (10)
//!             Date fields embed exactly DATE_WIDTH ASCII bytes; the null
//!             marker sits at offset DATE_WIDTH.
//!
//! DATE_TIME_FORMAT ("%Y-%m-%d %H:%M:%S")
//!       │
//!       └─> DATE_TIME_WIDTH (19)
//!             Same relationship for DateTime fields.
//!
//! PROGRESS_BATCH_SIZE (256)
//!       │
//!       └─> Below this record count every push is a report candidate;
//!           above it only multiples are, so a fast stream does not flood
//!           the host with count messages.
//!
//! PROGRESS_MIN_INTERVAL (10s)
//!       │
//!       └─> Candidates are additionally rate-limited to one report per
//!           interval; a final report bypasses both gates.
//! ```

use std::time::Duration;

/// chrono format string for `Date` field text.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Embedded byte width of a `Date` field's value text.
pub const DATE_WIDTH: usize = 10;

/// chrono format string for `DateTime` field text.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Embedded byte width of a `DateTime` field's value text.
pub const DATE_TIME_WIDTH: usize = 19;

/// Record-count granularity for progress reports once a stream is past its
/// first `PROGRESS_BATCH_SIZE` records.
pub const PROGRESS_BATCH_SIZE: u64 = 256;

/// Minimum wall-clock spacing between non-final progress reports.
pub const PROGRESS_MIN_INTERVAL: Duration = Duration::from_secs(10);
