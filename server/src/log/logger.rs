use crate::configs::system::LoggingConfig;
use crate::server_error::ServerError;
use std::io::{self, Write};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use tracing::{event, info, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{
    filter::LevelFilter, fmt, fmt::format::Format, fmt::MakeWriter, reload, reload::Handle,
    EnvFilter, Layer, Registry,
};

const LOG_FILE_PREFIX: &str = "chainbench-server.log";
const VERSION: &str = env!("CARGO_PKG_VERSION");

// Writer that does nothing
struct NullWriter;
impl Write for NullWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// Wrapper around Arc<Mutex<Vec<String>>> to implement Write
struct VecStringWriter(Arc<Mutex<Vec<String>>>);
impl Write for VecStringWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Ok(mut lock) = self.0.lock() {
            lock.push(String::from_utf8_lossy(buf).into_owned());
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// This struct exists solely to implement MakeWriter
struct VecStringMakeWriter(Arc<Mutex<Vec<String>>>);
impl<'a> MakeWriter<'a> for VecStringMakeWriter {
    type Writer = VecStringWriter;

    fn make_writer(&'a self) -> Self::Writer {
        VecStringWriter(self.0.clone())
    }
}

pub trait EarlyLogDumper {
    fn dump_to_file<W: Write>(&self, writer: &mut W) -> io::Result<()>;
    fn dump_to_stdout(&self) -> io::Result<()>;
}

impl EarlyLogDumper for Logging {
    fn dump_to_file<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let Ok(early_logs_buffer) = self.early_logs_buffer.lock() else {
            return Ok(());
        };
        for log in early_logs_buffer.iter() {
            let log = strip_ansi_escapes::strip(log);
            writer.write_all(&log)?;
        }
        Ok(())
    }

    fn dump_to_stdout(&self) -> io::Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        let Ok(early_logs_buffer) = self.early_logs_buffer.lock() else {
            return Ok(());
        };
        for log in early_logs_buffer.iter() {
            handle.write_all(log.as_bytes())?;
        }
        Ok(())
    }
}

// Make reload::Layer::new more readable
type ReloadHandle = Handle<Box<dyn Layer<Registry> + Send + Sync>, Registry>;

/// Two phase logging: everything logged before the configuration is loaded
/// goes to an in-memory buffer, which is replayed once `late_init` installs
/// the real stdout and file layers.
#[derive(Default)]
pub struct Logging {
    stdout_guard: Option<WorkerGuard>,
    stdout_reload_handle: Option<ReloadHandle>,

    file_guard: Option<WorkerGuard>,
    file_reload_handle: Option<ReloadHandle>,

    filtering_stdout_reload_handle: Option<ReloadHandle>,
    filtering_file_reload_handle: Option<ReloadHandle>,

    early_logs_buffer: Arc<Mutex<Vec<String>>>,
}

impl Logging {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn early_init(&mut self) {
        // Filtering layers are shared by the sink layers below, all of them
        // are replaced during late_init.
        let mut layers = vec![];

        let filtering_level = Self::get_filtering_level(None);
        let (filtering_stdout_layer, filtering_stdout_reload_handle) =
            reload::Layer::new(filtering_level.boxed());
        self.filtering_stdout_reload_handle = Some(filtering_stdout_reload_handle);

        let (filtering_file_layer, filtering_file_reload_handle) =
            reload::Layer::new(filtering_level.boxed());
        self.filtering_file_reload_handle = Some(filtering_file_reload_handle);

        let stdout_layer = fmt::Layer::default()
            .event_format(Self::get_log_format())
            .with_writer(|| NullWriter);
        let (stdout_layer, stdout_layer_reload_handle) = reload::Layer::new(stdout_layer.boxed());
        self.stdout_reload_handle = Some(stdout_layer_reload_handle);
        layers.push(stdout_layer.and_then(filtering_stdout_layer).boxed());

        let file_layer = fmt::Layer::default()
            .event_format(Self::get_log_format())
            .with_target(true)
            .with_writer(VecStringMakeWriter(self.early_logs_buffer.clone()))
            .with_ansi(true);
        let (file_layer, file_layer_reload_handle) = reload::Layer::new(file_layer.boxed());
        self.file_reload_handle = Some(file_layer_reload_handle);
        layers.push(file_layer.and_then(filtering_file_layer).boxed());

        // This is moment when we can start logging something and not worry about losing it.
        Registry::default()
            .with(layers)
            .with(EnvFilter::try_from_default_env().unwrap_or(EnvFilter::new("INFO")))
            .init();
        Self::print_build_info();
    }

    pub fn late_init(&mut self, config: &LoggingConfig) -> Result<(), ServerError> {
        let filtering_level = Self::get_filtering_level(Some(config));

        self.filtering_stdout_reload_handle
            .as_ref()
            .ok_or(ServerError::FilterReloadFailure)?
            .modify(|layer| *layer = filtering_level.boxed())
            .map_err(|_| ServerError::FilterReloadFailure)?;

        self.filtering_file_reload_handle
            .as_ref()
            .ok_or(ServerError::FilterReloadFailure)?
            .modify(|layer| *layer = filtering_level.boxed())
            .map_err(|_| ServerError::FilterReloadFailure)?;

        let (non_blocking_stdout, stdout_guard) = tracing_appender::non_blocking(io::stdout());
        let stdout_layer = fmt::Layer::default()
            .with_ansi(true)
            .event_format(Self::get_log_format())
            .with_writer(non_blocking_stdout)
            .boxed();
        self.stdout_guard = Some(stdout_guard);

        self.stdout_reload_handle
            .as_ref()
            .ok_or(ServerError::StdoutReloadFailure)?
            .modify(|layer| *layer = stdout_layer)
            .map_err(|_| ServerError::StdoutReloadFailure)?;

        self.dump_to_stdout()?;

        let file_layer_reload_handle = self
            .file_reload_handle
            .as_ref()
            .ok_or(ServerError::FileReloadFailure)?;

        if !config.file_enabled {
            file_layer_reload_handle
                .modify(|layer| {
                    *layer = fmt::Layer::default()
                        .with_writer(|| NullWriter)
                        .boxed()
                })
                .map_err(|_| ServerError::FileReloadFailure)?;
            Self::log_initialized(filtering_level, "Logging initialized, file logging is disabled.");
            return Ok(());
        }

        let logs_path = PathBuf::from(&config.path);
        let file_appender = tracing_appender::rolling::hourly(&logs_path, LOG_FILE_PREFIX);
        let (mut non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

        self.dump_to_file(&mut non_blocking_file)?;

        let file_layer = fmt::layer()
            .event_format(Self::get_log_format())
            .with_target(true)
            .with_writer(non_blocking_file)
            .with_ansi(false)
            .boxed();

        self.file_guard = Some(file_guard);
        file_layer_reload_handle
            .modify(|layer| *layer = file_layer)
            .map_err(|_| ServerError::FileReloadFailure)?;

        Self::log_initialized(
            filtering_level,
            &format!(
                "Logging initialized, logs will be stored at: {:?}. Logs will be rotated hourly. Log level is: {}.",
                logs_path, filtering_level
            ),
        );

        Ok(())
    }

    fn log_initialized(filtering_level: LevelFilter, message: &str) {
        match filtering_level {
            LevelFilter::OFF => (),
            LevelFilter::ERROR => event!(Level::ERROR, "{}", message),
            LevelFilter::WARN => event!(Level::WARN, "{}", message),
            LevelFilter::INFO => event!(Level::INFO, "{}", message),
            LevelFilter::DEBUG => event!(Level::DEBUG, "{}", message),
            LevelFilter::TRACE => event!(Level::TRACE, "{}", message),
        }
    }

    // RUST_LOG always takes precedence over config
    fn get_filtering_level(config: Option<&LoggingConfig>) -> LevelFilter {
        if let Ok(rust_log) = std::env::var("RUST_LOG") {
            if let Ok(level) = LevelFilter::from_str(&rust_log.to_uppercase()) {
                level
            } else {
                println!("Invalid RUST_LOG value: {}, falling back to info", rust_log);
                LevelFilter::INFO
            }
        } else if let Some(config) = config {
            if let Ok(level) = LevelFilter::from_str(&config.level.to_uppercase()) {
                level
            } else {
                println!(
                    "Invalid log level in config: {}, falling back to info",
                    config.level
                );
                LevelFilter::INFO
            }
        } else {
            LevelFilter::INFO
        }
    }

    fn get_log_format() -> Format {
        Format::default().with_thread_ids(true)
    }

    fn print_build_info() {
        info!("Version: {VERSION}");
    }
}
