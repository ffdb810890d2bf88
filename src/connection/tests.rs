//! Tests for the output connection lifecycle

use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::schema::{FieldDescriptor, Schema};
use crate::types::FieldType;

#[derive(Default)]
struct ReporterLog {
    metadata: Vec<String>,
    progress: Vec<(String, u64, u64)>,
    completed: u32,
}

#[derive(Default, Clone)]
struct MockReporter(Rc<RefCell<ReporterLog>>);

impl HostReporter for MockReporter {
    fn announce_metadata(&mut self, xml: &str) {
        self.0.borrow_mut().metadata.push(xml.to_string());
    }

    fn report_progress(&mut self, connection: &str, records: u64, bytes: u64) {
        self.0
            .borrow_mut()
            .progress
            .push((connection.to_string(), records, bytes));
    }

    fn complete(&mut self) {
        self.0.borrow_mut().completed += 1;
    }
}

#[derive(Default)]
struct SinkLog {
    inits: Vec<String>,
    records: Vec<Vec<u8>>,
    closed: u32,
}

struct MockSink {
    log: Rc<RefCell<SinkLog>>,
    fail_init: bool,
    fail_push_after: Option<usize>,
}

impl MockSink {
    fn new(log: Rc<RefCell<SinkLog>>) -> Self {
        Self {
            log,
            fail_init: false,
            fail_push_after: None,
        }
    }
}

impl RecordSink for MockSink {
    fn init(&mut self, connection: &str, _schema: &Schema) -> eyre::Result<()> {
        if self.fail_init {
            eyre::bail!("refused");
        }
        self.log.borrow_mut().inits.push(connection.to_string());
        Ok(())
    }

    fn push(&mut self, record: &[u8]) -> eyre::Result<()> {
        if let Some(limit) = self.fail_push_after {
            if self.log.borrow().records.len() >= limit {
                eyre::bail!("downstream gone");
            }
        }
        self.log.borrow_mut().records.push(record.to_vec());
        Ok(())
    }

    fn close(&mut self) {
        self.log.borrow_mut().closed += 1;
    }
}

fn test_schema() -> Schema {
    Schema::new(vec![FieldDescriptor::new("Count", FieldType::Int32)]).unwrap()
}

#[test]
fn init_announces_schema_and_initializes_sinks() {
    let reporter = MockReporter::default();
    let log = Rc::new(RefCell::new(SinkLog::default()));
    let mut conn = OutputConnection::new("Output", reporter.clone());
    conn.add_sink(Box::new(MockSink::new(log.clone())));

    conn.init(&test_schema()).unwrap();

    let reported = reporter.0.borrow();
    assert_eq!(reported.metadata.len(), 1);
    assert!(reported.metadata[0].starts_with("<MetaInfo connection=\"Output\">"));
    assert_eq!(log.borrow().inits, vec!["Output".to_string()]);
}

#[test]
fn init_drops_failing_sinks_and_reports_how_many() {
    let reporter = MockReporter::default();
    let good = Rc::new(RefCell::new(SinkLog::default()));
    let bad = Rc::new(RefCell::new(SinkLog::default()));
    let mut conn = OutputConnection::new("Output", reporter);
    conn.add_sink(Box::new(MockSink::new(good.clone())));
    let mut failing = MockSink::new(bad.clone());
    failing.fail_init = true;
    conn.add_sink(Box::new(failing));

    let err = conn.init(&test_schema()).unwrap_err();
    assert_eq!(err.to_string(), "1 connection(s) failed to initialize");

    // the healthy sink still receives records
    conn.push_record(&[1, 2, 3]);
    assert_eq!(good.borrow().records.len(), 1);
    assert_eq!(bad.borrow().records.len(), 0);
}

#[test]
fn push_record_fans_out_and_counts() {
    let reporter = MockReporter::default();
    let log = Rc::new(RefCell::new(SinkLog::default()));
    let mut conn = OutputConnection::new("Output", reporter);
    conn.add_sink(Box::new(MockSink::new(log.clone())));
    conn.init(&test_schema()).unwrap();

    conn.push_record(&[1, 2, 3, 4]);
    conn.push_record(&[5, 6]);

    assert_eq!(conn.record_count(), 2);
    assert_eq!(conn.record_bytes(), 6);
    assert_eq!(log.borrow().records, vec![vec![1, 2, 3, 4], vec![5, 6]]);
}

#[test]
fn failing_sink_is_retired_but_still_closed() {
    let reporter = MockReporter::default();
    let log = Rc::new(RefCell::new(SinkLog::default()));
    let mut conn = OutputConnection::new("Output", reporter);
    let mut sink = MockSink::new(log.clone());
    sink.fail_push_after = Some(1);
    conn.add_sink(Box::new(sink));
    conn.init(&test_schema()).unwrap();

    conn.push_record(&[1]);
    conn.push_record(&[2]);
    conn.push_record(&[3]);

    assert_eq!(log.borrow().records, vec![vec![1]]);
    assert_eq!(conn.record_count(), 3);

    conn.close();
    assert_eq!(log.borrow().closed, 1);
}

#[test]
fn progress_batch_gate_thins_out_past_the_batch_size() {
    // every record below the batch size qualifies
    assert!(progress_candidate(1, false));
    assert!(progress_candidate(255, false));

    // past it, only exact multiples do
    assert!(progress_candidate(256, false));
    assert!(!progress_candidate(257, false));
    assert!(progress_candidate(512, false));
    assert!(!progress_candidate(513, false));

    // the final report always qualifies
    assert!(progress_candidate(257, true));
}

#[test]
fn progress_is_rate_limited_until_final_report() {
    let reporter = MockReporter::default();
    let mut conn = OutputConnection::new("Output", reporter.clone());
    conn.init(&test_schema()).unwrap();

    for _ in 0..5 {
        conn.push_record(&[0; 8]);
    }
    // all pushes land inside the minimum interval, so nothing reported yet
    assert!(reporter.0.borrow().progress.is_empty());

    conn.close();
    let reported = reporter.0.borrow();
    assert_eq!(reported.progress, vec![("Output".to_string(), 5, 40)]);
    assert_eq!(reported.completed, 1);
}
