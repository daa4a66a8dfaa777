use super::Status;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DdeError {
    #[error("DDEML initialization failed (error {0:#06x})")]
    Initialize(u32),
    #[error("Could not create string handle for '{text}' (error {code:#06x})")]
    StringHandle { text: String, code: u32 },
    #[error("No DDE server answered on {server}|{topic} (error {code:#06x})")]
    Connect {
        server: String,
        topic: String,
        code: u32,
    },
    #[error("Could not create data handle for the command (error {0:#06x})")]
    DataHandle(u32),
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),
}

impl DdeError {
    /// Status code reported for this failure.
    pub fn status(&self) -> Status {
        match self {
            DdeError::Initialize(_) | DdeError::InvalidArgument(_) => Status::InitializeFailed,
            // A missing string handle makes the connect call fail.
            DdeError::StringHandle { .. } | DdeError::Connect { .. } => Status::ConnectFailed,
            DdeError::DataHandle(_) => Status::PayloadFailed,
        }
    }
}
