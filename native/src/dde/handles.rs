// RAII guards over DDEML handles. Each guard releases exactly the handle it owns.

use super::{DdeApi, DdeError, DdemlResult, WideText};
use log::debug;
use std::mem::ManuallyDrop;

/// A DDEML instance, uninitialized on drop.
pub struct Session<'a, A: DdeApi> {
    api: &'a A,
    instance: A::Instance,
}

impl<'a, A: DdeApi> Session<'a, A> {
    pub fn open(api: &'a A) -> Result<Self, DdeError> {
        let instance = api.initialize().map_err(DdeError::Initialize)?;
        debug!("[DDE] Session {:?} initialized", instance);
        Ok(Self { api, instance })
    }

    pub fn string_handle(&self, text: &WideText) -> Result<StringHandle<'_, A>, DdeError> {
        let handle = self
            .api
            .create_string_handle(self.instance, text)
            .map_err(|code| DdeError::StringHandle {
                text: text.to_string_lossy(),
                code,
            })?;

        Ok(StringHandle {
            session: self,
            handle,
            text: text.to_string_lossy(),
        })
    }

    /// Open a conversation. The string handles can be dropped as soon as this returns.
    pub fn connect(
        &self,
        server: &StringHandle<'_, A>,
        topic: &StringHandle<'_, A>,
    ) -> Result<Conversation<'_, A>, DdeError> {
        let handle = self
            .api
            .connect(self.instance, server.handle, topic.handle)
            .map_err(|code| DdeError::Connect {
                server: server.text.clone(),
                topic: topic.text.clone(),
                code,
            })?;

        debug!(
            "[DDE] Connected to {}|{} ({:?})",
            server.text, topic.text, handle
        );
        Ok(Conversation {
            session: self,
            handle,
        })
    }

    pub fn data_handle(&self, payload: &[u8], format: u32) -> Result<DataHandle<'_, A>, DdeError> {
        let handle = self
            .api
            .create_data_handle(self.instance, payload, format)
            .map_err(DdeError::DataHandle)?;

        Ok(DataHandle {
            session: self,
            handle,
        })
    }
}

impl<A: DdeApi> Drop for Session<'_, A> {
    fn drop(&mut self) {
        self.api.uninitialize(self.instance);
        debug!("[DDE] Session {:?} released", self.instance);
    }
}

/// A string handle, freed on drop.
pub struct StringHandle<'s, A: DdeApi> {
    session: &'s Session<'s, A>,
    handle: A::StringHandle,
    text: String,
}

impl<A: DdeApi> Drop for StringHandle<'_, A> {
    fn drop(&mut self) {
        self.session
            .api
            .free_string_handle(self.session.instance, self.handle);
    }
}

/// An open conversation, disconnected on drop.
pub struct Conversation<'s, A: DdeApi> {
    session: &'s Session<'s, A>,
    handle: A::Conversation,
}

impl<A: DdeApi> Conversation<'_, A> {
    /// Submit an execute transaction carrying `data` and return without waiting for the server.
    pub fn execute(&self, data: DataHandle<'_, A>) -> DdemlResult<()> {
        let data = data.into_raw();
        self.session
            .api
            .submit_execute(self.session.instance, self.handle, data)
    }
}

impl<A: DdeApi> Drop for Conversation<'_, A> {
    fn drop(&mut self) {
        self.session.api.disconnect(self.handle);
    }
}

/// A data handle that is freed on drop unless a transaction took it.
pub struct DataHandle<'s, A: DdeApi> {
    session: &'s Session<'s, A>,
    handle: A::Data,
}

impl<A: DdeApi> DataHandle<'_, A> {
    /// Give up ownership, typically to a transaction.
    pub fn into_raw(self) -> A::Data {
        let this = ManuallyDrop::new(self);
        this.handle
    }
}

impl<A: DdeApi> Drop for DataHandle<'_, A> {
    fn drop(&mut self) {
        self.session.api.free_data_handle(self.handle);
    }
}
