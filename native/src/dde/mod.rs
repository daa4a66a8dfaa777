// DDE execute bridge: one conversation per call, fire-and-forget execute transaction.

mod api;
mod client;
#[cfg(windows)]
mod ddeml;
mod error;
#[cfg(test)]
pub(crate) mod fake;
mod handles;
mod status;
#[cfg(not(windows))]
mod unsupported;
mod wide;

pub use api::{DdeApi, DdemlResult};
pub use client::{execute_with, CF_UNICODETEXT};
pub use error::DdeError;
pub use handles::{Conversation, DataHandle, Session, StringHandle};
pub use status::Status;
pub use wide::WideText;

#[cfg(windows)]
pub use ddeml::{DdeCallback, Ddeml};
#[cfg(not(windows))]
pub use unsupported::Unsupported;

/// DDEML binding for the current target.
#[cfg(windows)]
pub type PlatformApi = Ddeml;
/// DDEML binding for the current target.
#[cfg(not(windows))]
pub type PlatformApi = Unsupported;

/// Binding used by the exported entry points.
pub fn platform() -> PlatformApi {
    PlatformApi::default()
}
