//! Tracing subscriber setup

use crate::settings::{LogFormat, RuntimeSettings};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber writing to stdout
///
/// An unparsable filter falls back to `info` and is reported as a warning
/// through the installed subscriber. Calling this twice keeps the first
/// subscriber.
pub fn init_tracing(settings: &RuntimeSettings) {
    init_tracing_with_writer(settings, std::io::stdout);
}

/// Install the global subscriber writing to `writer`
pub fn init_tracing_with_writer<W>(settings: &RuntimeSettings, writer: W)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let (filter, rejected) = match EnvFilter::try_new(&settings.log_filter) {
        Ok(filter) => (filter, None),
        Err(e) => (EnvFilter::new("info"), Some(e)),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(false);

    // Lambda's log sink stamps every line already
    let result = match settings.log_format {
        LogFormat::Json => builder
            .json()
            .flatten_event(true)
            .with_current_span(false)
            .without_time()
            .try_init(),
        LogFormat::Text => builder.with_ansi(false).without_time().try_init(),
    };

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
    if let Some(e) = rejected {
        tracing::warn!(filter = %settings.log_filter, error = %e, "invalid log filter, using info");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn invalid_filter_falls_back_and_warns() {
        let buffer = Buffer::default();
        let writer = buffer.clone();
        let settings = RuntimeSettings::new().with_log_filter("scv_handler=loud");

        init_tracing_with_writer(&settings, move || writer.clone());
        tracing::info!(marker = "telemetry-check", "resolved");
        tracing::debug!(marker = "telemetry-check", "below the filter");

        // Other tests in this binary may log through the same subscriber
        let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<serde_json::Value> = output
            .lines()
            .filter_map(|l| serde_json::from_str::<serde_json::Value>(l).ok())
            .collect();

        let warning = lines
            .iter()
            .find(|l| l["message"] == "invalid log filter, using info")
            .unwrap();
        assert_eq!(warning["level"], "WARN");
        assert_eq!(warning["filter"], "scv_handler=loud");

        let marked: Vec<_> = lines.iter().filter(|l| l["marker"] == "telemetry-check").collect();
        assert_eq!(marked.len(), 1);
        assert_eq!(marked[0]["level"], "INFO");
        assert_eq!(marked[0]["message"], "resolved");
    }
}
