use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Maximum log file size before rotation (5 MB)
const MAX_LOG_SIZE: u64 = 5 * 1024 * 1024;
/// Size to keep after rotation (1 MB of most recent logs)
const KEEP_SIZE: u64 = 1024 * 1024;

const LOG_FILE_NAME: &str = "finproj.log";

/// Where log lines go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// `finproj.log` inside the data directory
    File,
}

/// Trim a log file down to its last `keep` bytes once it exceeds `max`
fn rotate_log_if_needed(log_path: &Path, max: u64, keep: u64) -> std::io::Result<()> {
    if !log_path.exists() {
        return Ok(());
    }

    let metadata = fs::metadata(log_path)?;
    if metadata.len() <= max {
        return Ok(());
    }

    let mut file = File::open(log_path)?;
    let start_pos = metadata.len().saturating_sub(keep);

    file.seek(SeekFrom::Start(start_pos))?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;
    drop(file);

    // Drop the partial first line
    let skip = buffer
        .iter()
        .position(|&b| b == b'\n')
        .map(|i| i + 1)
        .unwrap_or(0);

    let mut file = File::create(log_path)?;
    file.write_all(b"--- Log rotated (older entries removed) ---\n")?;
    file.write_all(&buffer[skip..])?;

    Ok(())
}

/// Hands out writers onto one shared log file
#[derive(Clone)]
struct LogWriterFactory {
    file: Arc<Mutex<File>>,
}

struct LogWriter {
    file: Arc<Mutex<File>>,
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        file.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        file.flush()
    }
}

impl<'a> MakeWriter<'a> for LogWriterFactory {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter {
            file: self.file.clone(),
        }
    }
}

/// Filter used when `RUST_LOG` is not set
fn default_filter(level: &str) -> String {
    format!("finproj={level},finproj_core=warn")
}

/// Initialize logging.
///
/// File logging writes to `{data_dir}/finproj.log`; when the log exceeds 5MB
/// only the last 1MB is kept. The level can be set with `level` or
/// overridden entirely through `RUST_LOG`.
pub fn init_logging(data_dir: &Path, level: &str, target: LogTarget) -> color_eyre::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(level)));

    match target {
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_thread_ids(false),
                )
                .init();
            tracing::info!("finproj logging initialized (stderr)");
        }
        LogTarget::File => {
            fs::create_dir_all(data_dir)?;
            let log_path = data_dir.join(LOG_FILE_NAME);

            if let Err(e) = rotate_log_if_needed(&log_path, MAX_LOG_SIZE, KEEP_SIZE) {
                eprintln!("Warning: Failed to rotate log file: {}", e);
            }

            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)?;

            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_writer(LogWriterFactory {
                            file: Arc::new(Mutex::new(file)),
                        })
                        .with_ansi(false)
                        .with_target(true)
                        .with_thread_ids(false),
                )
                .init();
            tracing::info!(
                "finproj logging initialized (log_path={})",
                log_path.display()
            );
        }
    }

    Ok(())
}
