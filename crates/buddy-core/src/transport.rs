//! Transport boundary.
//!
//! Defines the interface the SDK consumes to reach the remote service. The
//! concrete HTTP implementation lives in `buddy-infrastructure`; tests plug in
//! scripted doubles.

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::params::ParamBag;
use crate::service_code::ServiceCode;

/// One row of a record-set response. Every value arrives as a string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WireRecord(BTreeMap<String, String>);

impl WireRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly used by tests and the HTTP body parser.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for WireRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Successful raw response of one remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawPayload {
    /// Zero-length body.
    Empty,
    /// Bare scalar answer ("1", a token, a date...).
    Text(String),
    /// Record set. An empty vector is a valid "nothing found" answer.
    Records(Vec<WireRecord>),
}

impl RawPayload {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// True when the payload carries nothing a hydrator could use.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.trim().is_empty(),
            Self::Records(records) => records.is_empty(),
        }
    }
}

/// Failure classification reported by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    /// The call did not complete (connectivity, timeout, HTTP status, bad body).
    Transport(String),
    /// The service answered with an error code.
    Service(ServiceCode),
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(message) => write!(f, "transport failure: {message}"),
            Self::Service(code) => write!(f, "service code {code}"),
        }
    }
}

impl std::error::Error for WireError {}

/// Raw outcome of a single call.
pub type WireResult = Result<RawPayload, WireError>;

/// A file-bearing parameter for upload endpoints.
#[derive(Clone, PartialEq, Eq)]
pub struct Upload {
    /// Logical form field name the service expects.
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(
        field: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            field: field.into(),
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Renames the form field; operations use this to force the name their
    /// endpoint expects.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }
}

impl fmt::Debug for Upload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Upload")
            .field("field", &self.field)
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// The network boundary every operation goes through.
///
/// Implementations must complete each call exactly once and must not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Calls `method` with the given form parameters.
    async fn invoke(&self, method: &str, params: ParamBag) -> WireResult;

    /// Calls `method` and returns the raw response body (photos, blobs, videos).
    async fn download(&self, method: &str, params: ParamBag) -> Result<Vec<u8>, WireError>;

    /// Calls `method` with a multipart body carrying `file` next to `params`.
    async fn upload(&self, method: &str, params: ParamBag, file: Upload) -> WireResult;
}

/// Runs a job on a caller-owned thread (typically a UI event loop).
pub trait Dispatcher: Send + Sync {
    fn dispatch(&self, job: Box<dyn FnOnce() + Send + 'static>);
}

/// Runs the job in place on whatever task completed the call.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineDispatcher;

impl Dispatcher for InlineDispatcher {
    fn dispatch(&self, job: Box<dyn FnOnce() + Send + 'static>) {
        job();
    }
}
