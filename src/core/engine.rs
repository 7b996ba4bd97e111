use crate::core::{export::export, session::DataSession};
use crate::domain::model::Dataset;
use crate::domain::ports::{ConfigProvider, Storage};
use crate::utils::error::{Result, SiftError};
use crate::utils::monitor::SystemMonitor;
use crate::utils::timing::OperationReport;

/// What one engine run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub records: Dataset,
    pub output_path: Option<String>,
    pub reports: Vec<OperationReport>,
}

/// Drives a [`DataSession`] through process, filter, sort and save, the way
/// a user would click through them.
pub struct SiftEngine<S: Storage, C: ConfigProvider> {
    session: DataSession<S>,
    config: C,
    monitor: SystemMonitor,
}

impl<S: Storage, C: ConfigProvider> SiftEngine<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self::new_with_monitoring(storage, config, false)
    }

    pub fn new_with_monitoring(storage: S, config: C, enable_monitoring: bool) -> Self {
        Self {
            session: DataSession::new(storage),
            config,
            monitor: SystemMonitor::new(enable_monitoring),
        }
    }

    pub async fn run(mut self) -> Result<RunSummary> {
        let input = self
            .config
            .input_path()
            .ok_or_else(|| SiftError::MissingConfigError {
                field: "input".to_string(),
            })?
            .to_string();

        let mut reports = Vec::new();
        self.monitor.log_stats("Start");

        tracing::info!("📥 Processing {}", input);
        self.session.select_file(input);
        self.session.process().await?;
        reports.extend(self.session.last_report().cloned());
        self.monitor.log_stats("Process");

        if let Some(text) = self.config.filter_text() {
            if self.session.original().is_empty() {
                tracing::warn!("Nothing to filter, skipping");
            } else {
                tracing::info!("🔎 Filtering by '{}'", text);
                self.session.apply_filter(text)?;
                reports.extend(self.session.last_report().cloned());
                self.monitor.log_stats("Filter");
            }
        }

        if let Some(key) = self.config.sort_key() {
            if self.session.data().is_empty() {
                tracing::warn!("Nothing to sort, skipping");
            } else {
                tracing::info!("↕️ Sorting by {}", key);
                self.session.sort(key)?;
                reports.extend(self.session.last_report().cloned());
                self.monitor.log_stats("Sort");
            }
        }

        let output_path = match self.config.output_path() {
            Some(path) => {
                let format = self.config.output_format();
                let bytes = export(self.session.data(), format)?;
                tracing::info!(
                    "💾 Writing {} records as {:?} to {}",
                    self.session.data().len(),
                    format,
                    path
                );
                self.session.storage().write_file(path, &bytes).await?;
                Some(path.to_string())
            }
            None => None,
        };

        self.monitor.log_final_stats();

        Ok(RunSummary {
            records: self.session.into_data(),
            output_path,
            reports,
        })
    }
}
