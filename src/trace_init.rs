//! JSONL trace sink for the `search` / `generate_syllables` / `match_phrases`
//! spans, enabled with the `trace` feature.

use std::io;
use std::path::{Path, PathBuf};

/// File name the sink writes under its directory.
pub const TRACE_FILE: &str = "vtv-trace.jsonl";

#[cfg(feature = "trace")]
const DEFAULT_FILTER: &str = "vtv_engine=debug,vtv_core=debug,vtv_cli=debug";

#[cfg(feature = "trace")]
static INIT: std::sync::Once = std::sync::Once::new();

/// Route `tracing` output to `<log_dir>/vtv-trace.jsonl`, creating the
/// directory if needed. Returns the trace file path. Only the first call
/// installs a subscriber; later calls just report the path.
#[cfg(feature = "trace")]
pub fn init_tracing(log_dir: &Path) -> io::Result<Option<PathBuf>> {
    std::fs::create_dir_all(log_dir)?;
    INIT.call_once(|| {
        let appender = tracing_appender::rolling::never(log_dir, TRACE_FILE);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        std::mem::forget(guard); // flushes for the life of the process

        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER));
        let installed = tracing_subscriber::fmt()
            .json()
            .with_writer(writer)
            .with_target(true)
            .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
            .with_env_filter(filter)
            .try_init();
        if installed.is_err() {
            eprintln!("tracing subscriber already set; {TRACE_FILE} stays empty");
        }
    });
    Ok(Some(log_dir.join(TRACE_FILE)))
}

/// Without the `trace` feature there is no sink: nothing is created and
/// `None` is returned.
#[cfg(not(feature = "trace"))]
pub fn init_tracing(_log_dir: &Path) -> io::Result<Option<PathBuf>> {
    Ok(None)
}
