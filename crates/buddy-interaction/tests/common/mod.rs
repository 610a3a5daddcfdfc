#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use buddy_core::transport::WireResult;
use buddy_core::{
    ClientConfig, ParamBag, RawPayload, ServiceCode, Transport, Upload, WireError, WireRecord,
};
use buddy_interaction::{AuthenticatedUser, BuddyClient};

/// One call the SDK made.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: String,
    pub params: ParamBag,
    pub upload: Option<Upload>,
}

/// Transport double answering from a FIFO script and recording every call.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<WireResult>>,
    downloads: Mutex<VecDeque<Result<Vec<u8>, WireError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, outcome: WireResult) -> &Self {
        self.replies.lock().unwrap().push_back(outcome);
        self
    }

    pub fn reply_text(&self, text: &str) -> &Self {
        self.reply(Ok(RawPayload::text(text)))
    }

    pub fn reply_records(&self, records: Vec<WireRecord>) -> &Self {
        self.reply(Ok(RawPayload::Records(records)))
    }

    pub fn reply_code(&self, code: &str) -> &Self {
        self.reply(Err(WireError::Service(ServiceCode::new(code))))
    }

    pub fn fail(&self, message: &str) -> &Self {
        self.reply(Err(WireError::Transport(message.to_string())))
    }

    pub fn reply_bytes(&self, bytes: Vec<u8>) -> &Self {
        self.downloads.lock().unwrap().push_back(Ok(bytes));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn methods(&self) -> Vec<String> {
        self.calls().into_iter().map(|call| call.method).collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn forget_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, method: &str, params: ParamBag, upload: Option<Upload>) {
        self.calls.lock().unwrap().push(RecordedCall {
            method: method.to_string(),
            params,
            upload,
        });
    }

    fn next(&self, method: &str) -> WireResult {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(WireError::Transport(format!("no scripted reply for {method}"))))
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn invoke(&self, method: &str, params: ParamBag) -> WireResult {
        self.record(method, params, None);
        self.next(method)
    }

    async fn download(&self, method: &str, params: ParamBag) -> Result<Vec<u8>, WireError> {
        self.record(method, params, None);
        self.downloads
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(WireError::Transport(format!("no scripted bytes for {method}"))))
    }

    async fn upload(&self, method: &str, params: ParamBag, file: Upload) -> WireResult {
        self.record(method, params, Some(file));
        self.next(method)
    }
}

pub fn config() -> ClientConfig {
    ClientConfig::new("test-app", "app-secret").with_record_device_on_login(false)
}

pub fn client(transport: &Arc<ScriptedTransport>) -> BuddyClient {
    BuddyClient::new(config(), transport.clone()).expect("Should build client")
}

pub fn profile_record(id: i64, name: &str) -> WireRecord {
    WireRecord::new()
        .with("UserID", id.to_string())
        .with("UserName", name)
        .with("UserGender", "Male")
        .with("UserAge", "31")
        .with("StatusID", "1")
        .with("UserEmail", format!("{name}@example.com"))
        .with("UserLatitude", "47.6062")
        .with("UserLongitude", "-122.3321")
        .with("CelebMode", "0")
}

/// Logs `name` in against a scripted transport and clears the recorded calls.
pub async fn logged_in(transport: &Arc<ScriptedTransport>, name: &str) -> AuthenticatedUser {
    transport
        .reply_text("UT-token-1")
        .reply_records(vec![profile_record(42, name)]);
    let user = client(transport)
        .login(name, "hunter2")
        .await
        .expect("Should log in");
    transport.forget_calls();
    user
}
