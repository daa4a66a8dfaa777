use super::WideText;
use std::fmt::Debug;

/// Result of a raw DDEML call; the error is the DDEML error code.
pub type DdemlResult<T> = Result<T, u32>;

/// The subset of DDEML the execute bridge needs.
///
/// Implementations only wrap the raw calls. Pairing every acquisition with
/// its release is the job of the guards in `handles`.
pub trait DdeApi {
    type Instance: Copy + Debug;
    type StringHandle: Copy + Debug;
    type Conversation: Copy + Debug;
    type Data: Copy + Debug;

    /// Create a client-only instance with the callback the binding was built with.
    fn initialize(&self) -> DdemlResult<Self::Instance>;
    fn uninitialize(&self, instance: Self::Instance);

    fn create_string_handle(
        &self,
        instance: Self::Instance,
        text: &WideText,
    ) -> DdemlResult<Self::StringHandle>;
    fn free_string_handle(&self, instance: Self::Instance, handle: Self::StringHandle);

    fn connect(
        &self,
        instance: Self::Instance,
        server: Self::StringHandle,
        topic: Self::StringHandle,
    ) -> DdemlResult<Self::Conversation>;
    fn disconnect(&self, conversation: Self::Conversation);

    /// Copy `payload` into a system-owned data handle tagged with clipboard `format`.
    fn create_data_handle(
        &self,
        instance: Self::Instance,
        payload: &[u8],
        format: u32,
    ) -> DdemlResult<Self::Data>;
    fn free_data_handle(&self, data: Self::Data);

    /// Submit an asynchronous execute transaction.
    ///
    /// Ownership of `data` passes to DDEML whatever the outcome.
    fn submit_execute(
        &self,
        instance: Self::Instance,
        conversation: Self::Conversation,
        data: Self::Data,
    ) -> DdemlResult<()>;
}
