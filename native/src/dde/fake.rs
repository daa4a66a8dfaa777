// Recording stand-in for DDEML used by the unit tests.

use super::{DdeApi, DdemlResult, WideText};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

pub const DMLERR_DLL_NOT_INITIALIZED: u32 = 0x4003;
pub const DMLERR_MEMORY_ERROR: u32 = 0x4008;
pub const DMLERR_NO_CONV_ESTABLISHED: u32 = 0x400a;
pub const DMLERR_SYS_ERROR: u32 = 0x400f;

/// Call that should fail when injected with `FakeDdeml::failing_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Initialize,
    StringHandle,
    Connect,
    DataHandle,
    Execute,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Initialize,
    Uninitialize(u32),
    CreateString(String),
    FreeString(u32),
    Connect { server: String, topic: String },
    Disconnect(u32),
    CreateData { format: u32, len: usize },
    FreeData(u32),
    Execute { conversation: u32, data: u32 },
}

#[derive(Default)]
struct State {
    next_handle: u32,
    live: HashSet<u32>,
    strings: HashMap<u32, String>,
    payloads: HashMap<u32, Vec<u8>>,
    executed: Vec<Vec<u8>>,
    calls: Vec<Call>,
}

impl State {
    fn allocate(&mut self) -> u32 {
        self.next_handle += 1;
        self.live.insert(self.next_handle);
        self.next_handle
    }

    fn release(&mut self, handle: u32) {
        assert!(
            self.live.remove(&handle),
            "handle {} released twice or never acquired",
            handle
        );
    }
}

/// DDEML double that hands out numbered handles and checks every release.
#[derive(Default)]
pub struct FakeDdeml {
    servers: Vec<(String, String)>,
    fail_at: Option<Step>,
    state: Mutex<State>,
}

impl FakeDdeml {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept conversations on `server`/`topic` (matched case-insensitively, as DDEML does).
    pub fn with_server(mut self, server: &str, topic: &str) -> Self {
        self.servers.push((server.to_string(), topic.to_string()));
        self
    }

    pub fn failing_at(mut self, step: Step) -> Self {
        self.fail_at = Some(step);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Handles acquired and not yet released (instance included).
    pub fn live_handles(&self) -> usize {
        self.state.lock().unwrap().live.len()
    }

    /// Payloads of every execute transaction that was accepted.
    pub fn executed_payloads(&self) -> Vec<Vec<u8>> {
        self.state.lock().unwrap().executed.clone()
    }

    fn fails(&self, step: Step) -> bool {
        self.fail_at == Some(step)
    }
}

impl DdeApi for FakeDdeml {
    type Instance = u32;
    type StringHandle = u32;
    type Conversation = u32;
    type Data = u32;

    fn initialize(&self) -> DdemlResult<u32> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Initialize);
        if self.fails(Step::Initialize) {
            return Err(DMLERR_DLL_NOT_INITIALIZED);
        }
        Ok(state.allocate())
    }

    fn uninitialize(&self, instance: u32) {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Uninitialize(instance));
        state.release(instance);
    }

    fn create_string_handle(&self, _instance: u32, text: &WideText) -> DdemlResult<u32> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::CreateString(text.to_string_lossy()));
        if self.fails(Step::StringHandle) {
            return Err(DMLERR_SYS_ERROR);
        }
        let handle = state.allocate();
        state.strings.insert(handle, text.to_string_lossy());
        Ok(handle)
    }

    fn free_string_handle(&self, _instance: u32, handle: u32) {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::FreeString(handle));
        state.strings.remove(&handle);
        state.release(handle);
    }

    fn connect(&self, _instance: u32, server: u32, topic: u32) -> DdemlResult<u32> {
        let mut state = self.state.lock().unwrap();
        let server = state.strings.get(&server).cloned().unwrap_or_default();
        let topic = state.strings.get(&topic).cloned().unwrap_or_default();
        state.calls.push(Call::Connect {
            server: server.clone(),
            topic: topic.clone(),
        });

        let listening = self.servers.iter().any(|(s, t)| {
            s.eq_ignore_ascii_case(&server) && t.eq_ignore_ascii_case(&topic)
        });
        if !listening || self.fails(Step::Connect) {
            return Err(DMLERR_NO_CONV_ESTABLISHED);
        }
        Ok(state.allocate())
    }

    fn disconnect(&self, conversation: u32) {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Disconnect(conversation));
        state.release(conversation);
    }

    fn create_data_handle(&self, _instance: u32, payload: &[u8], format: u32) -> DdemlResult<u32> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::CreateData {
            format,
            len: payload.len(),
        });
        if self.fails(Step::DataHandle) {
            return Err(DMLERR_MEMORY_ERROR);
        }
        let handle = state.allocate();
        state.payloads.insert(handle, payload.to_vec());
        Ok(handle)
    }

    fn free_data_handle(&self, data: u32) {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::FreeData(data));
        state.payloads.remove(&data);
        state.release(data);
    }

    fn submit_execute(&self, _instance: u32, conversation: u32, data: u32) -> DdemlResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Execute { conversation, data });

        // DDEML owns the data handle from here on, accepted or not.
        state.release(data);
        let payload = state.payloads.remove(&data).unwrap_or_default();

        if self.fails(Step::Execute) {
            return Err(DMLERR_SYS_ERROR);
        }
        state.executed.push(payload);
        Ok(())
    }
}
