// Stand-in binding for targets without DDEML: every session fails to start.

use super::{DdeApi, DdemlResult, WideText};
use log::warn;

const DMLERR_DLL_NOT_INITIALIZED: u32 = 0x4003;

#[derive(Debug, Clone, Copy, Default)]
pub struct Unsupported;

impl DdeApi for Unsupported {
    type Instance = ();
    type StringHandle = ();
    type Conversation = ();
    type Data = ();

    fn initialize(&self) -> DdemlResult<()> {
        warn!("[DDE] DDEML is only available on Windows");
        Err(DMLERR_DLL_NOT_INITIALIZED)
    }

    fn uninitialize(&self, _instance: ()) {}

    fn create_string_handle(&self, _instance: (), _text: &WideText) -> DdemlResult<()> {
        Err(DMLERR_DLL_NOT_INITIALIZED)
    }

    fn free_string_handle(&self, _instance: (), _handle: ()) {}

    fn connect(&self, _instance: (), _server: (), _topic: ()) -> DdemlResult<()> {
        Err(DMLERR_DLL_NOT_INITIALIZED)
    }

    fn disconnect(&self, _conversation: ()) {}

    fn create_data_handle(&self, _instance: (), _payload: &[u8], _format: u32) -> DdemlResult<()> {
        Err(DMLERR_DLL_NOT_INITIALIZED)
    }

    fn free_data_handle(&self, _data: ()) {}

    fn submit_execute(&self, _instance: (), _conversation: (), _data: ()) -> DdemlResult<()> {
        Err(DMLERR_DLL_NOT_INITIALIZED)
    }
}
