use crate::config::BridgeConfig;
use log::{error, info, LevelFilter};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

static CRASH_LOG_PATH: Mutex<Option<PathBuf>> = Mutex::new(None);

const CRASH_LOG_FILE: &str = "rust_crash.log";

/// Initialize env_logger with the configured filter (warn by default).
pub fn init_logger(config: &BridgeConfig) {
    let mut builder = env_logger::Builder::new();

    match config.log_filter.as_deref() {
        Some(filter) => {
            builder.parse_filters(filter);
        }
        None => {
            builder.filter_level(LevelFilter::Warn);
        }
    }

    builder.format(|buf, record| {
        writeln!(
            buf,
            "[{}] {}: {}",
            record.level(),
            record.target(),
            record.args()
        )
    });

    let _ = builder.try_init();
}

/// Initialize crash logging and chain a panic hook in front of the existing one.
pub fn init_crash_logger(config: &BridgeConfig) {
    let log_dir = config.crash_log_dir();
    let _ = fs::create_dir_all(&log_dir);

    let log_path = log_dir.join(CRASH_LOG_FILE);
    set_crash_log_path(log_path.clone());

    // The host process may have its own hook; keep it running after ours.
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let crash_msg = format_panic_message(panic_info);

        if let Err(e) = write_crash_log(&crash_msg) {
            error!("[CRASH LOGGER] Failed to write crash log: {}", e);
        }

        error!("\n{}", crash_msg);
        previous(panic_info);
    }));

    info!("[CRASH LOGGER] Initialized - Log: {:?}", log_path);
}

fn set_crash_log_path(path: PathBuf) {
    let mut path_guard = CRASH_LOG_PATH.lock().unwrap_or_else(|e| e.into_inner());
    *path_guard = Some(path);
}

/// Format panic message with timestamp, location, payload, and backtrace.
fn format_panic_message(panic_info: &std::panic::PanicHookInfo) -> String {
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");

    let payload = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic payload".to_string()
    };

    let location = if let Some(location) = panic_info.location() {
        format!(
            "{}:{}:{}",
            location.file(),
            location.line(),
            location.column()
        )
    } else {
        "Unknown location".to_string()
    };

    format!(
        r#"
===== RUST PANIC =====
Timestamp: {}
Location: {}
Message: {}
Thread: {:?}

Backtrace:
{:?}

"#,
        timestamp,
        location,
        payload,
        std::thread::current().name().unwrap_or("unnamed"),
        std::backtrace::Backtrace::capture()
    )
}

/// Append a message to the crash log.
fn write_crash_log(message: &str) -> std::io::Result<()> {
    let path_guard = CRASH_LOG_PATH.lock().unwrap_or_else(|e| e.into_inner());
    if let Some(ref log_path) = *path_guard {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        writeln!(file, "{}", message)?;
    }
    Ok(())
}

/// Record a failure that an export recovered from, so it still shows up in the crash log.
pub fn log_critical_error(context: &str, error: &str) {
    let entry = format!(
        "{} CRITICAL [{}] {} (thread {})",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
        context,
        error,
        std::thread::current().name().unwrap_or("unnamed")
    );

    if let Err(e) = write_crash_log(&entry) {
        error!("[CRASH LOGGER] Failed to record critical error: {}", e);
    }

    error!("[{}] {}", context, error);
}
