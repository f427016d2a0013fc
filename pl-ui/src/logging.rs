//! Log output for the dashboard binary.
//!
//! Records go to stderr and, once a path is configured, to an append-mode
//! file. The level filter and the console on/off switch can be changed at
//! runtime (the shell's `log <level>` command uses this).

use anyhow::{Result, anyhow, bail};
use chrono::Local;
use std::{
    fs::File,
    io::{self, IsTerminal, Write},
    path::Path,
    sync::{Arc, Mutex, MutexGuard, OnceLock},
};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{
        FmtContext, MakeWriter,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    reload,
    util::SubscriberInitExt,
};

use crate::config::LoggingSection;

const DIM: &str = "\x1b[2m";
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

fn level_color(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

/// `<local time> <LEVEL> <target> <fields>`, colored on a terminal.
struct LocalTimeFormat;

impl<S, N> FormatEvent<S, N> for LocalTimeFormat
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
        let meta = event.metadata();
        let timestamp = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");

        if writer.has_ansi_escapes() {
            write!(
                writer,
                "{DIM}{timestamp}{RESET} {}{:>5}{RESET} {CYAN}{}{RESET} ",
                level_color(meta.level()),
                meta.level(),
                meta.target()
            )?;
        } else {
            write!(writer, "{timestamp} {:>5} {} ", meta.level(), meta.target())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

type SharedFile = Arc<Mutex<Option<File>>>;

/// Writer for the file layer. Output is dropped until a file is attached.
#[derive(Clone)]
struct LogFile(SharedFile);

struct LogFileGuard<'a>(MutexGuard<'a, Option<File>>);

impl Write for LogFileGuard<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.as_mut().map_or(Ok(buf.len()), |file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.as_mut().map_or(Ok(()), |file| file.flush())
    }
}

fn lock_file(shared: &SharedFile) -> MutexGuard<'_, Option<File>> {
    shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogFileGuard<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LogFileGuard(lock_file(&self.0))
    }
}

type ReloadLevel = Box<dyn Fn(&str) -> Result<()> + Send + Sync>;
type ReloadConsole = Box<dyn Fn(bool) -> Result<()> + Send + Sync>;

/// Runtime handles, set once by [`init_logging`].
struct LogControl {
    reload_level: ReloadLevel,
    reload_console: ReloadConsole,
    file: SharedFile,
}

static CONTROL: OnceLock<LogControl> = OnceLock::new();

fn control() -> Result<&'static LogControl> {
    match CONTROL.get() {
        Some(control) => Ok(control),
        None => bail!("logging not yet initialized"),
    }
}

/// `RUST_LOG` when set, otherwise the configured level.
fn initial_filter(configured: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

fn level_reloader<S>(handle: reload::Handle<EnvFilter, S>) -> ReloadLevel
where
    S: Subscriber + Send + Sync + 'static,
{
    Box::new(move |directive: &str| {
        let filter = EnvFilter::try_new(directive)
            .map_err(|e| anyhow!("invalid log level '{directive}': {e}"))?;
        handle
            .reload(filter)
            .map_err(|e| anyhow!("log level reload failed: {e}"))
    })
}

fn console_reloader<S>(handle: reload::Handle<EnvFilter, S>) -> ReloadConsole
where
    S: Subscriber + Send + Sync + 'static,
{
    // The console gate only switches stderr on or off; the level filter
    // still decides which records exist.
    Box::new(move |enabled: bool| {
        let gate = EnvFilter::new(if enabled { "trace" } else { "off" });
        handle
            .reload(gate)
            .map_err(|e| anyhow!("console gate reload failed: {e}"))
    })
}

/// Changes the active log filter. Accepts a bare level (`debug`) or any
/// `EnvFilter` directive (`pl_core=trace`).
pub fn set_log_level(directive: &str) -> Result<()> {
    (control()?.reload_level)(directive)
}

/// Turns stderr log output on or off. File logging is unaffected.
pub fn set_console_enabled(enabled: bool) -> Result<()> {
    (control()?.reload_console)(enabled)
}

/// Appends log records to `path`, replacing any file already attached.
/// The parent directory must exist.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| anyhow!("cannot open log file '{}': {e}", path.display()))?;

    *lock_file(&control()?.file) = Some(file);
    Ok(())
}

/// Installs the global subscriber from the `[logging]` section and applies
/// its `console` and `file` settings. Only the first call installs anything.
pub fn init_logging(settings: &LoggingSection) -> Result<()> {
    let file: SharedFile = Arc::new(Mutex::new(None));
    let (console_gate, console_handle) = reload::Layer::new(EnvFilter::new("trace"));
    let (level_filter, level_handle) = reload::Layer::new(initial_filter(&settings.level));

    let console_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalTimeFormat)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .with_filter(console_gate);

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalTimeFormat)
        .with_ansi(false)
        .with_writer(LogFile(file.clone()));

    let installed = tracing_subscriber::registry()
        .with(level_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .is_ok();

    if installed {
        let _ = CONTROL.set(LogControl {
            reload_level: level_reloader(level_handle),
            reload_console: console_reloader(console_handle),
            file,
        });
    }

    if !settings.console {
        set_console_enabled(false)?;
    }
    if let Some(path) = &settings.file {
        enable_file_logging(path)?;
    }
    Ok(())
}
