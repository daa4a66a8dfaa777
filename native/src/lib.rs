pub mod api;
pub mod config;
pub mod dde;
pub mod logging;
pub mod viewer;

pub use config::BridgeConfig;
pub use dde::{DdeError, Status, WideText};
pub use viewer::{CommandContext, DdeTarget, PresetRegistry, ViewerAction, ViewerPreset};

/// Send `command` to the DDE server `server` on `topic` and disconnect.
///
/// Returns once the execute transaction has been submitted or the first step
/// has failed. See [`Status`] for the codes reported to foreign callers.
pub fn execute(server: &str, topic: &str, command: &str) -> Status {
    execute_wide(
        &WideText::new(server),
        &WideText::new(topic),
        &WideText::new(command),
    )
}

pub fn execute_wide(server: &WideText, topic: &WideText, command: &WideText) -> Status {
    dde::execute_with(&dde::platform(), server, topic, command)
}
