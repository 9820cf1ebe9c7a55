//! `tracing`-backed collaborators for running without a social account.

use async_trait::async_trait;
use std::path::Path;
use tracing::{debug, error, info, trace, warn, Level};

use super::protocols::{Incident, IncidentReporter, Poster};
use crate::errors::Result;

/// An incident reporter that logs incidents using the tracing framework.
#[derive(Debug, Clone)]
pub struct LoggingIncidentReporter {
    level: Level,
}

impl Default for LoggingIncidentReporter {
    fn default() -> Self {
        Self { level: Level::WARN }
    }
}

impl LoggingIncidentReporter {
    /// Creates a reporter logging at `level`.
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self { level }
    }}

#[async_trait]
impl IncidentReporter for LoggingIncidentReporter {
    async fn report(&self, incident: Incident) {
        let designation = incident.designation.as_deref().unwrap_or("-");
        match self.level {
            Level::ERROR => error!(designation, error = %incident.error, "Incident:\n{incident}"),
            Level::WARN => warn!(designation, error = %incident.error, "Incident:\n{incident}"),
            Level::INFO => info!(designation, error = %incident.error, "Incident:\n{incident}"),
            Level::DEBUG => debug!(designation, error = %incident.error, "Incident:\n{incident}"),
            _ => trace!(designation, error = %incident.error, "Incident:\n{incident}"),
        }
    }
}

/// A poster that logs statuses instead of publishing them.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunPoster;

#[async_trait]
impl Poster for DryRunPoster {
    async fn post(&self, status: &str, image: Option<&Path>) -> Result<()> {
        info!(image = ?image, "Dry run post:\n{status}");
        Ok(())
    }

    async fn reply(&self, status: &str, in_reply_to: &str, image: Option<&Path>) -> Result<()> {
        info!(in_reply_to, image = ?image, "Dry run reply:\n{status}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::io;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl CapturedLog {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    impl io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    async fn log_incident_at(level: Level) -> String {
        let captured = CapturedLog::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::TRACE)
            .with_ansi(false)
            .without_time()
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        LoggingIncidentReporter::new(level)
            .report(Incident::new("boom").with_designation("173"))
            .await;
        captured.contents()
    }

    #[tokio::test]
    async fn test_dry_run_accepts_everything() {
        let poster = DryRunPoster;
        assert!(poster.post("SCP-173 - The Sculpture", None).await.is_ok());
        assert!(poster
            .reply("@reader SCP-173", "42", Some(Path::new("images/173.jpg")))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_logging_reporter_never_fails() {
        LoggingIncidentReporter::default()
            .report(Incident::new("boom").with_designation("173"))
            .await;
        LoggingIncidentReporter::new(Level::INFO)
            .report(Incident::new("boom"))
            .await;
    }

    #[tokio::test]
    async fn test_error_level_incident() {
        let output = log_incident_at(Level::ERROR).await;
        assert!(output.contains("ERROR"), "{output}");
        assert!(output.contains("Error: boom"), "{output}");
    }

    #[tokio::test]
    async fn test_warn_level_incident() {
        let output = log_incident_at(Level::WARN).await;
        assert!(output.contains("WARN"), "{output}");
        assert!(!output.contains("ERROR"), "{output}");
    }

    #[tokio::test]
    async fn test_info_level_incident() {
        let output = log_incident_at(Level::INFO).await;
        assert!(output.contains("INFO"), "{output}");
        assert!(!output.contains("WARN"), "{output}");
    }

    #[tokio::test]
    async fn test_debug_level_incident() {
        let output = log_incident_at(Level::DEBUG).await;
        assert!(output.contains("DEBUG"), "{output}");
        assert!(!output.contains("WARN"), "{output}");
    }

    #[tokio::test]
    async fn test_trace_level_incident() {
        let output = log_incident_at(Level::TRACE).await;
        assert!(output.contains("TRACE"), "{output}");
        assert!(output.contains("designation=\"173\""), "{output}");
    }
}
