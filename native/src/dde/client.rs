use super::{DdeApi, DdeError, Session, Status, WideText};
use log::{debug, warn};

/// Standard clipboard format for NUL-terminated UTF-16 text.
pub const CF_UNICODETEXT: u32 = 13;

/// Connect to `server`/`topic`, submit `command` as an execute transaction and disconnect.
///
/// Blocks until the transaction has been handed to DDEML. The server's
/// handling of the command is not observed: `Status::Submitted` only means the
/// transaction was issued. Every handle acquired along the way is released
/// before this returns, whichever step fails.
pub fn execute_with<A: DdeApi>(
    api: &A,
    server: &WideText,
    topic: &WideText,
    command: &WideText,
) -> Status {
    match send_execute(api, server, topic, command) {
        Ok(()) => Status::Submitted,
        Err(err) => {
            let status = err.status();
            match status {
                // Expected whenever the target application is not running.
                Status::ConnectFailed => debug!("[DDE] {}", err),
                _ => warn!("[DDE] {}", err),
            }
            status
        }
    }
}

fn send_execute<A: DdeApi>(
    api: &A,
    server: &WideText,
    topic: &WideText,
    command: &WideText,
) -> Result<(), DdeError> {
    let session = Session::open(api)?;

    // String handles are only needed for the connect call.
    let conversation = {
        let server = session.string_handle(server)?;
        let topic = session.string_handle(topic)?;
        session.connect(&server, &topic)
    }?;

    let data = session.data_handle(&command.payload(), CF_UNICODETEXT)?;

    if let Err(code) = conversation.execute(data) {
        debug!(
            "[DDE] Execute transaction on {}|{} not accepted (error {:#06x})",
            server, topic, code
        );
    } else {
        debug!(
            "[DDE] Execute transaction submitted to {}|{} ({} units)",
            server,
            topic,
            command.len()
        );
    }

    Ok(())
}
