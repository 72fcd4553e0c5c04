use crate::utils::error::Result;
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Arc;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Renders `timestamp - LEVEL - message` lines, the format the cron job's
/// log file has always used.
struct HyphenatedFormat;

impl<S, N> FormatEvent<S, N> for HyphenatedFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let level = match *event.metadata().level() {
            Level::ERROR => "ERROR",
            Level::WARN => "WARNING",
            Level::INFO => "INFO",
            Level::DEBUG => "DEBUG",
            Level::TRACE => "TRACE",
        };
        write!(writer, "{} - {} - ", timestamp, level)?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Opens the log sink in append mode, creating parent directories as needed.
pub fn open_log_file(path: &str) -> Result<File> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(file)
}

/// Installs the process-wide subscriber: the job's log file always, plus a
/// compact stderr layer when running verbose.
pub fn init_file_logger(path: &str, verbose: bool) -> Result<()> {
    let file = open_log_file(path)?;

    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mp_etl=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mp_etl=info"))
    };

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(HyphenatedFormat)
        .with_ansi(false)
        .with_writer(Arc::new(file));

    let stderr_layer = verbose.then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .compact()
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    Ok(())
}
