//! # Output Connection Lifecycle
//!
//! Manages the stream-open handshake, record delivery, and progress
//! reporting for one named output. The host side is abstracted behind two
//! traits so the core stays free of transport concerns:
//!
//! - [`RecordSink`]: a downstream consumer of finished record blobs that can
//!   fail per record; a failing sink is retired, not retried.
//! - [`HostReporter`]: the host-engine message surface — schema metadata
//!   announcement, throttled record-count progress, and stream completion.
//!
//! ## Progress Throttling
//!
//! Every record below [`PROGRESS_BATCH_SIZE`] is a report candidate, above
//! that only multiples of it are, and candidates are further rate-limited to
//! one report per [`PROGRESS_MIN_INTERVAL`]. The final report at close
//! bypasses both gates.

#[cfg(test)]
mod tests;

use std::time::Instant;

use eyre::Result;
use tracing::{debug, info};

use crate::config::{PROGRESS_BATCH_SIZE, PROGRESS_MIN_INTERVAL};
use crate::schema::Schema;

/// Downstream consumer of finished record blobs.
pub trait RecordSink {
    /// Called once at stream open with the connection label and schema.
    fn init(&mut self, connection: &str, schema: &Schema) -> Result<()>;

    /// Delivers one frozen record image. An error retires this sink for the
    /// rest of the stream.
    fn push(&mut self, record: &[u8]) -> Result<()>;

    /// Called once at stream close, for both live and retired sinks.
    fn close(&mut self);
}

/// Host-engine message surface consumed by the connection lifecycle.
pub trait HostReporter {
    /// Announces the serialized schema document at stream-open time.
    fn announce_metadata(&mut self, xml: &str);

    /// Reports the running record count and cumulative byte size.
    fn report_progress(&mut self, connection: &str, records: u64, bytes: u64);

    /// Signals that the stream is complete.
    fn complete(&mut self);
}

/// One named output stream: schema handshake, fan-out to sinks, progress.
pub struct OutputConnection<R: HostReporter> {
    name: String,
    reporter: R,
    sinks: Vec<Box<dyn RecordSink>>,
    finished: Vec<Box<dyn RecordSink>>,
    record_count: u64,
    record_bytes: u64,
    last_report: Instant,
}

impl<R: HostReporter> OutputConnection<R> {
    pub fn new(name: impl Into<String>, reporter: R) -> Self {
        Self {
            name: name.into(),
            reporter,
            sinks: Vec::new(),
            finished: Vec::new(),
            record_count: 0,
            record_bytes: 0,
            last_report: Instant::now(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn record_count(&self) -> u64 {
        self.record_count
    }

    pub fn record_bytes(&self) -> u64 {
        self.record_bytes
    }

    /// Registers a downstream sink. Sinks added after [`init`](Self::init)
    /// miss the handshake.
    pub fn add_sink(&mut self, sink: Box<dyn RecordSink>) {
        self.sinks.push(sink);
    }

    /// Opens the stream: announces the schema to the host, then initializes
    /// every sink. Sinks that fail to initialize are dropped from delivery;
    /// if any failed the error says how many.
    pub fn init(&mut self, schema: &Schema) -> Result<()> {
        self.last_report = Instant::now();
        let xml = schema.to_wire_xml(&self.name);
        self.reporter.announce_metadata(&xml);

        let mut errs = 0;
        let mut live = Vec::with_capacity(self.sinks.len());
        for mut sink in self.sinks.drain(..) {
            match sink.init(&self.name, schema) {
                Ok(()) => live.push(sink),
                Err(err) => {
                    debug!(connection = %self.name, %err, "sink failed to initialize");
                    errs += 1;
                }
            }
        }
        self.sinks = live;

        if errs > 0 {
            eyre::bail!("{errs} connection(s) failed to initialize");
        }
        info!(connection = %self.name, sinks = self.sinks.len(), "output connection open");
        Ok(())
    }

    /// Delivers one frozen record image to every live sink, retiring sinks
    /// whose push fails, and emits a throttled progress report.
    pub fn push_record(&mut self, record: &[u8]) {
        self.record_count += 1;
        self.record_bytes += record.len() as u64;
        self.maybe_report_progress(false);

        let mut idx = 0;
        while idx < self.sinks.len() {
            match self.sinks[idx].push(record) {
                Ok(()) => idx += 1,
                Err(err) => {
                    debug!(connection = %self.name, %err, "sink failed, retiring it");
                    let sink = self.sinks.remove(idx);
                    self.finished.push(sink);
                }
            }
        }
    }

    /// Closes the stream: final progress report, close of every sink (live
    /// and retired), completion signal.
    pub fn close(&mut self) {
        self.maybe_report_progress(true);
        for sink in self.sinks.iter_mut().chain(self.finished.iter_mut()) {
            sink.close();
        }
        self.reporter.complete();
        info!(
            connection = %self.name,
            records = self.record_count,
            bytes = self.record_bytes,
            "output connection closed"
        );
    }

    fn maybe_report_progress(&mut self, final_report: bool) {
        if !progress_candidate(self.record_count, final_report) {
            return;
        }
        let now = Instant::now();
        if final_report || now.duration_since(self.last_report) > PROGRESS_MIN_INTERVAL {
            self.reporter
                .report_progress(&self.name, self.record_count, self.record_bytes);
            self.last_report = now;
        }
    }
}

/// Batch gate for progress reports: every record below
/// [`PROGRESS_BATCH_SIZE`] qualifies, above that only exact multiples, and
/// the final report always does.
pub(crate) fn progress_candidate(count: u64, final_report: bool) -> bool {
    count < PROGRESS_BATCH_SIZE || count % PROGRESS_BATCH_SIZE == 0 || final_report
}
