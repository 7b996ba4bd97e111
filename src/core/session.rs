use crate::core::{filter::filter_records, parse::parse_bytes, sort::sort_records};
use crate::domain::model::{Dataset, SortKey};
use crate::domain::ports::Storage;
use crate::utils::error::{Result, SiftError};
use crate::utils::timing::{measure, Operation, OperationReport, Stopwatch};

/// Holds the loaded dataset between user actions.
///
/// `original` is what the last `process` produced and is the input of every
/// filter. `data` is what a front end displays: the processed, filtered or
/// sorted records. Each operation either replaces `data` completely or leaves
/// it untouched on error.
pub struct DataSession<S: Storage> {
    storage: S,
    file: Option<String>,
    original: Dataset,
    data: Dataset,
    loading: bool,
    last_report: Option<OperationReport>,
}

impl<S: Storage> DataSession<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            file: None,
            original: Dataset::default(),
            data: Dataset::default(),
            loading: false,
            last_report: None,
        }
    }

    pub fn select_file(&mut self, path: impl Into<String>) {
        self.file = Some(path.into());
    }

    pub fn selected_file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn data(&self) -> &Dataset {
        &self.data
    }

    pub fn original(&self) -> &Dataset {
        &self.original
    }

    pub fn into_data(self) -> Dataset {
        self.data
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_report(&self) -> Option<&OperationReport> {
        self.last_report.as_ref()
    }

    /// Reads and parses the selected file; both `original` and `data` become
    /// the parsed records.
    pub async fn process(&mut self) -> Result<&Dataset> {
        let Some(path) = self.file.clone() else {
            return Err(SiftError::validation("Select a file first."));
        };

        let main_thread = Stopwatch::start();
        self.loading = true;
        let mut report = OperationReport::new(Operation::Process);

        let read_watch = Stopwatch::start();
        let read = self.storage.read_file(&path).await;
        report.read_ms = read_watch.elapsed_ms();

        let outcome = read.and_then(|bytes| {
            tracing::debug!("Read {} bytes from {}", bytes.len(), path);
            let (parsed, parse_ms) = measure(|| parse_bytes(&bytes));
            report.phase_ms = parse_ms;
            parsed
        });

        let outcome = match outcome {
            Ok(dataset) => {
                self.original = dataset.clone();
                self.data = dataset;
                Ok(())
            }
            Err(e) => Err(e),
        };

        self.finish(report, main_thread, outcome)
    }

    /// Filters the processed records by `text`, replacing the displayed ones.
    pub fn apply_filter(&mut self, text: &str) -> Result<&Dataset> {
        if self.original.is_empty() {
            return Err(SiftError::validation(
                "No data to filter. Process a file first.",
            ));
        }
        if text.trim().is_empty() {
            return Err(SiftError::validation("Enter a filter text."));
        }

        let main_thread = Stopwatch::start();
        self.loading = true;
        let mut report = OperationReport::new(Operation::Filter);

        let (filtered, filter_ms) = measure(|| filter_records(&self.original, text));
        report.phase_ms = filter_ms;
        tracing::debug!(
            "Filter '{}' kept {} of {} records",
            text,
            filtered.len(),
            self.original.len()
        );
        self.data = filtered;

        self.finish(report, main_thread, Ok(()))
    }

    /// Sorts the displayed records by `key`.
    pub fn sort(&mut self, key: SortKey) -> Result<&Dataset> {
        if self.data.is_empty() {
            return Err(SiftError::validation("No data to sort. Process a file first."));
        }

        let main_thread = Stopwatch::start();
        self.loading = true;
        let mut report = OperationReport::new(Operation::Sort);

        let (sorted, sort_ms) = measure(|| sort_records(&self.data, key));
        report.phase_ms = sort_ms;
        self.data = sorted;

        self.finish(report, main_thread, Ok(()))
    }

    /// Shows the processed records again, dropping any filter.
    pub fn reset_filter(&mut self) -> &Dataset {
        self.data = self.original.clone();
        &self.data
    }

    fn finish(
        &mut self,
        mut report: OperationReport,
        main_thread: Stopwatch,
        outcome: Result<()>,
    ) -> Result<&Dataset> {
        self.loading = false;

        report.main_thread_ms = main_thread.elapsed_ms();
        report.blocking_ms = report.main_thread_ms;
        report.total_ms = report.read_ms + report.phase_ms;
        report.records_processed = self.data.len();
        report.succeeded = outcome.is_ok();

        if let Err(e) = &outcome {
            tracing::error!("{} failed: {}", report.operation, e);
        }
        report.log();
        self.last_report = Some(report);

        outcome.map(|_| &self.data)
    }
}
