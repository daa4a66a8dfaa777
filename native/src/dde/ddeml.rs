// Win32 DDEML binding (user32).

use super::{DdeApi, DdemlResult, WideText};
use windows::core::PCWSTR;
use windows::Win32::System::DataExchange::{
    DdeClientTransaction, DdeConnect, DdeCreateDataHandle, DdeCreateStringHandleW, DdeDisconnect,
    DdeFreeDataHandle, DdeFreeStringHandle, DdeGetLastError, DdeInitializeW, DdeUninitialize,
    APPCLASS_STANDARD, APPCMD_CLIENTONLY, DDE_INITIALIZE_COMMAND, HCONV, HDDEDATA, HSZ,
    XTYP_EXECUTE,
};

const DMLERR_NO_ERROR: u32 = 0;
const CP_WINUNICODE: i32 = 1200;
const TIMEOUT_ASYNC: u32 = u32::MAX;
// cbData value meaning pData is an HDDEDATA rather than a buffer.
const DATA_IS_HANDLE: u32 = u32::MAX;

/// DDEML transaction callback (`PFNCALLBACK`).
pub type DdeCallback = unsafe extern "system" fn(
    u32,
    u32,
    HCONV,
    HSZ,
    HSZ,
    HDDEDATA,
    usize,
    usize,
) -> HDDEDATA;

/// DdeInitializeW rejects a null callback, even for client-only instances that
/// never wait on asynchronous replies. This one ignores every transaction.
unsafe extern "system" fn noop_callback(
    _wtype: u32,
    _wfmt: u32,
    _hconv: HCONV,
    _hsz1: HSZ,
    _hsz2: HSZ,
    _hdata: HDDEDATA,
    _dwdata1: usize,
    _dwdata2: usize,
) -> HDDEDATA {
    HDDEDATA(std::ptr::null_mut())
}

/// Client-only DDEML binding.
#[derive(Clone, Copy)]
pub struct Ddeml {
    callback: DdeCallback,
}

impl Default for Ddeml {
    fn default() -> Self {
        Self::new()
    }
}

impl Ddeml {
    pub fn new() -> Self {
        Self::with_callback(noop_callback)
    }

    /// Register `callback` instead of the no-op one at instance creation.
    pub fn with_callback(callback: DdeCallback) -> Self {
        Self { callback }
    }
}

impl DdeApi for Ddeml {
    type Instance = u32;
    type StringHandle = HSZ;
    type Conversation = HCONV;
    type Data = HDDEDATA;

    fn initialize(&self) -> DdemlResult<u32> {
        let mut instance = 0u32;
        let flags = DDE_INITIALIZE_COMMAND(APPCLASS_STANDARD.0 | APPCMD_CLIENTONLY.0);

        let rc = unsafe { DdeInitializeW(&mut instance, Some(self.callback), flags, 0) };
        if rc == DMLERR_NO_ERROR {
            Ok(instance)
        } else {
            Err(rc)
        }
    }

    fn uninitialize(&self, instance: u32) {
        unsafe {
            let _ = DdeUninitialize(instance);
        }
    }

    fn create_string_handle(&self, instance: u32, text: &WideText) -> DdemlResult<HSZ> {
        let handle =
            unsafe { DdeCreateStringHandleW(instance, PCWSTR(text.as_ptr()), CP_WINUNICODE) };
        if handle.0.is_null() {
            Err(unsafe { DdeGetLastError(instance) })
        } else {
            Ok(handle)
        }
    }

    fn free_string_handle(&self, instance: u32, handle: HSZ) {
        unsafe {
            let _ = DdeFreeStringHandle(instance, handle);
        }
    }

    fn connect(&self, instance: u32, server: HSZ, topic: HSZ) -> DdemlResult<HCONV> {
        let conversation = unsafe { DdeConnect(instance, server, topic, None) };
        if conversation.0.is_null() {
            Err(unsafe { DdeGetLastError(instance) })
        } else {
            Ok(conversation)
        }
    }

    fn disconnect(&self, conversation: HCONV) {
        unsafe {
            let _ = DdeDisconnect(conversation);
        }
    }

    fn create_data_handle(&self, instance: u32, payload: &[u8], format: u32) -> DdemlResult<HDDEDATA> {
        // afCmd 0: the handle is not app-owned, so a transaction frees it.
        let data = unsafe { DdeCreateDataHandle(instance, Some(payload), 0, None, format, 0) };
        if data.0.is_null() {
            Err(unsafe { DdeGetLastError(instance) })
        } else {
            Ok(data)
        }
    }

    fn free_data_handle(&self, data: HDDEDATA) {
        unsafe {
            let _ = DdeFreeDataHandle(data);
        }
    }

    fn submit_execute(&self, instance: u32, conversation: HCONV, data: HDDEDATA) -> DdemlResult<()> {
        let result = unsafe {
            DdeClientTransaction(
                Some(data.0 as *const u8),
                DATA_IS_HANDLE,
                conversation,
                None,
                0,
                XTYP_EXECUTE,
                TIMEOUT_ASYNC,
                None,
            )
        };
        if result.0.is_null() {
            Err(unsafe { DdeGetLastError(instance) })
        } else {
            Ok(())
        }
    }
}
