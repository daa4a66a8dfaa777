// Foreign-function entry points. Nothing may unwind past these functions.

pub mod exports;
pub mod java;

use crate::config::BridgeConfig;
use crate::dde::Status;
use crate::logging;
use once_cell::sync::OnceCell;
use std::panic::{self, UnwindSafe};

static LOGGING_READY: OnceCell<()> = OnceCell::new();

/// Set up logging the first time any export is called.
fn ensure_logging() {
    LOGGING_READY.get_or_init(|| {
        let config = BridgeConfig::from_env();
        logging::init_logger(&config);
        logging::init_crash_logger(&config);
    });
}

/// Run an export body with logging initialised and panics converted to a status code.
pub(crate) fn guarded<F>(context: &str, body: F) -> i32
where
    F: FnOnce() -> Status + UnwindSafe,
{
    guarded_with(context, ensure_logging, body).code()
}

/// Logger setup runs under the same unwind guard as the body.
fn guarded_with<S, F>(context: &str, setup: S, body: F) -> Status
where
    S: FnOnce() + UnwindSafe,
    F: FnOnce() -> Status + UnwindSafe,
{
    catch_status(context, move || {
        setup();
        body()
    })
}

/// A panic is reported as `InitializeFailed`: the caller only learns the command was not sent.
fn catch_status<F>(context: &str, body: F) -> Status
where
    F: FnOnce() -> Status + UnwindSafe,
{
    match panic::catch_unwind(body) {
        Ok(status) => status,
        Err(_) => {
            logging::log_critical_error(context, "panicked, command not sent");
            Status::InitializeFailed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_becomes_initialize_failure() {
        let status = catch_status("test export", || -> Status { panic!("boom") });
        assert_eq!(status, Status::InitializeFailed);
    }

    #[test]
    fn panicking_setup_is_contained() {
        let status = guarded_with(
            "test export",
            || panic!("logger setup failed"),
            || Status::Submitted,
        );
        assert_eq!(status, Status::InitializeFailed);
    }

    #[test]
    fn setup_runs_before_body() {
        let status = guarded_with("test export", || {}, || Status::ConnectFailed);
        assert_eq!(status, Status::ConnectFailed);
    }

    #[test]
    fn status_passes_through() {
        assert_eq!(
            catch_status("test export", || Status::ConnectFailed),
            Status::ConnectFailed
        );
    }
}
