//! Structured logging setup for tilesnap

use std::fs::OpenOptions;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::{
    fmt::{self, time::UtcTime, writer::BoxMakeWriter, writer::MakeWriterExt},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: LogLevel,
    /// Log format (json, pretty, compact)
    pub format: LogFormat,
    pub output: LogOutput,
    /// Required when output includes a file
    pub file_path: Option<String>,
    /// Include source file and line numbers
    pub include_source: bool,
    pub include_thread_names: bool,
    /// Trace every state transition of the tiling controller
    pub performance_tracing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {}", s)),
        }
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable, multi-line
    Pretty,
    Compact,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: {}", s)),
        }
    }
}

/// Where log lines go. Command output owns stdout, so logs default to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    Stderr,
    Stdout,
    File,
    /// Stderr and file
    Both,
}

impl FromStr for LogOutput {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stderr" => Ok(LogOutput::Stderr),
            "stdout" => Ok(LogOutput::Stdout),
            "file" => Ok(LogOutput::File),
            "both" => Ok(LogOutput::Both),
            _ => Err(format!("Invalid log output: {}", s)),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Warn,
            format: LogFormat::Compact,
            output: LogOutput::Stderr,
            file_path: None,
            include_source: false,
            include_thread_names: false,
            performance_tracing: false,
        }
    }
}

impl LogConfig {
    /// Preset used by `--verbose`
    pub fn development() -> Self {
        Self {
            level: LogLevel::Debug,
            format: LogFormat::Pretty,
            output: LogOutput::Stderr,
            file_path: None,
            include_source: true,
            include_thread_names: true,
            performance_tracing: true,
        }
    }

    /// Load configuration from `TILESNAP_LOG_*` environment variables on top
    /// of `self`. Unparseable values are ignored.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("TILESNAP_LOG_LEVEL").and_then(|v| v.parse().ok()) {
            self.level = level;
        }
        if let Some(format) = lookup("TILESNAP_LOG_FORMAT").and_then(|v| v.parse().ok()) {
            self.format = format;
        }
        if let Some(output) = lookup("TILESNAP_LOG_OUTPUT").and_then(|v| v.parse().ok()) {
            self.output = output;
        }
        if let Some(file_path) = lookup("TILESNAP_LOG_FILE") {
            self.file_path = Some(file_path);
        }
        if let Some(include_source) = lookup("TILESNAP_LOG_SOURCE") {
            self.include_source = include_source.eq_ignore_ascii_case("true");
        }
        if let Some(performance) = lookup("TILESNAP_LOG_PERFORMANCE") {
            self.performance_tracing = performance.eq_ignore_ascii_case("true");
        }
        self
    }

    /// `RUST_LOG`-style directives for this configuration
    pub fn filter_directives(&self) -> String {
        let mut directives = format!("tilesnap={}", self.level.as_directive());
        if self.performance_tracing {
            directives.push_str(",tilesnap::services::tiling_controller=trace");
        }
        directives
    }
}

/// Install the global tracing subscriber. `RUST_LOG` takes precedence over
/// the configured level.
pub fn init_logging(config: &LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.filter_directives()));
    let writer = create_writer(config)?;

    tracing_subscriber::registry()
        .with(create_layer(config, writer).with_filter(filter))
        .try_init()?;

    debug!(?config, "Logging initialized");
    Ok(())
}

fn create_writer(config: &LogConfig) -> Result<BoxMakeWriter, Box<dyn std::error::Error>> {
    let open_file = || -> Result<Arc<std::fs::File>, Box<dyn std::error::Error>> {
        let path = config
            .file_path
            .as_deref()
            .ok_or("File path required for file output")?;
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Arc::new(file))
    };

    let writer = match config.output {
        LogOutput::Stderr => BoxMakeWriter::new(std::io::stderr),
        LogOutput::Stdout => BoxMakeWriter::new(std::io::stdout),
        LogOutput::File => BoxMakeWriter::new(open_file()?),
        LogOutput::Both => BoxMakeWriter::new(std::io::stderr.and(open_file()?)),
    };
    Ok(writer)
}

fn create_layer(
    config: &LogConfig,
    writer: BoxMakeWriter,
) -> Box<dyn Layer<Registry> + Send + Sync> {
    let layer = fmt::layer()
        .with_writer(writer)
        .with_timer(UtcTime::rfc_3339())
        .with_thread_names(config.include_thread_names)
        .with_file(config.include_source)
        .with_line_number(config.include_source);

    match config.format {
        LogFormat::Pretty => Box::new(layer.pretty()),
        LogFormat::Compact => Box::new(layer.compact()),
        LogFormat::Json => Box::new(layer.json()),
    }
}
