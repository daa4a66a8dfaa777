// C ABI for hosts that are not a JVM.

use crate::dde::{self, DdeApi, DdeError, Status, WideText};
use log::warn;
use std::ffi::c_char;

static VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "\0");

/// Send `command` to the DDE server `server` on `topic`.
///
/// Returns 0 when the execute transaction was submitted, 1 when no DDE session
/// could be started (or an argument was null), 2 when no server answered and
/// 3 when the command could not be wrapped for sending.
///
/// # Safety
/// Each pointer must be null or point to a NUL-terminated UTF-16 string that
/// stays valid for the duration of the call.
#[no_mangle]
pub unsafe extern "system" fn ddeclient_execute(
    server: *const u16,
    topic: *const u16,
    command: *const u16,
) -> i32 {
    super::guarded("ddeclient_execute", || unsafe {
        execute_raw(&dde::platform(), server, topic, command)
    })
}

/// Crate version as a static NUL-terminated string.
#[no_mangle]
pub extern "system" fn ddeclient_version() -> *const c_char {
    VERSION.as_ptr() as *const c_char
}

/// # Safety
/// Same pointer contract as [`ddeclient_execute`].
unsafe fn execute_raw<A: DdeApi>(
    api: &A,
    server: *const u16,
    topic: *const u16,
    command: *const u16,
) -> Status {
    match read_arguments(server, topic, command) {
        Ok((server, topic, command)) => dde::execute_with(api, &server, &topic, &command),
        Err(err) => {
            warn!("[API] {}", err);
            err.status()
        }
    }
}

unsafe fn read_arguments(
    server: *const u16,
    topic: *const u16,
    command: *const u16,
) -> Result<(WideText, WideText, WideText), DdeError> {
    let server = WideText::from_ptr(server).ok_or(DdeError::InvalidArgument("server is null"))?;
    let topic = WideText::from_ptr(topic).ok_or(DdeError::InvalidArgument("topic is null"))?;
    let command =
        WideText::from_ptr(command).ok_or(DdeError::InvalidArgument("command is null"))?;
    Ok((server, topic, command))
}
