use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::time::Instant;

/// Wall-clock timer reporting fractional milliseconds.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    start: Instant,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

/// Runs `f` and returns its output with the elapsed milliseconds.
pub fn measure<T>(f: impl FnOnce() -> T) -> (T, f64) {
    let watch = Stopwatch::start();
    let out = f();
    (out, watch.elapsed_ms())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Process,
    Filter,
    Sort,
}

impl Operation {
    /// Name of the phase timed inside the operation.
    pub fn phase_label(&self) -> &'static str {
        match self {
            Operation::Process => "Parse JSON",
            Operation::Filter => "Filtering",
            Operation::Sort => "Sorting",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Process => "PROCESS",
            Operation::Filter => "FILTER",
            Operation::Sort => "SORT",
        };
        f.write_str(name)
    }
}

/// Timing measurements for one session operation.
///
/// Everything runs on the calling thread, so `blocking_ms` equals the
/// main-thread time measured around the whole operation.
#[derive(Debug, Clone, Serialize)]
pub struct OperationReport {
    pub operation: Operation,
    pub thread_count: usize,
    pub read_ms: f64,
    pub main_thread_ms: f64,
    pub phase_ms: f64,
    pub blocking_ms: f64,
    pub total_ms: f64,
    pub records_processed: usize,
    pub succeeded: bool,
    pub recorded_at: DateTime<Utc>,
}

impl OperationReport {
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            thread_count: 1,
            read_ms: 0.0,
            main_thread_ms: 0.0,
            phase_ms: 0.0,
            blocking_ms: 0.0,
            total_ms: 0.0,
            records_processed: 0,
            succeeded: false,
            recorded_at: Utc::now(),
        }
    }

    pub fn log(&self) {
        tracing::info!("--- KPIs --- {}", self.operation);
        tracing::info!("Threads used: {}", self.thread_count);
        tracing::info!("Read: {:.3} ms", self.read_ms);
        tracing::info!("Main thread processing: {:.3} ms", self.main_thread_ms);
        tracing::info!("  - {}: {:.3} ms", self.operation.phase_label(), self.phase_ms);
        tracing::info!("Estimated page blocking: {:.3} ms", self.blocking_ms);
        tracing::info!("Total processing: {:.3} ms", self.total_ms);
        tracing::info!("Records processed: {}", self.records_processed);
        if !self.succeeded {
            tracing::warn!("{} did not complete", self.operation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_returns_output() {
        let (value, ms) = measure(|| (1..=10).sum::<u32>());
        assert_eq!(value, 55);
        assert!(ms >= 0.0);
    }

    #[test]
    fn test_report_defaults_to_single_thread() {
        let report = OperationReport::new(Operation::Sort);
        assert_eq!(report.thread_count, 1);
        assert!(!report.succeeded);
        assert_eq!(report.operation.to_string(), "SORT");

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["operation"], "sort");
    }
}
