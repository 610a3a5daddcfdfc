//! Core building blocks of the Buddy Platform client SDK.
//!
//! - `transport`: the network boundary every call goes through
//! - `params`: argument validation and request parameter bags
//! - `adapter`: turns raw outcomes into typed results
//! - `surface`: the future/callback `PendingCall`
//! - `operation`: ties a method, its parameters and an adapter together
//! - `model`: hydrated domain entities

pub mod adapter;
pub mod config;
pub mod error;
pub mod model;
pub mod operation;
pub mod params;
pub mod service_code;
pub mod session;
pub mod surface;
pub mod transport;

pub use adapter::SentinelPolicy;
pub use config::{ClientConfig, DeviceInfo, NotificationPlatform};
pub use error::{BuddyError, BuddyResult};
pub use operation::Operation;
pub use params::ParamBag;
pub use service_code::ServiceCode;
pub use session::{AuthenticatedSession, Session, UserToken};
pub use surface::{CallStatus, PendingCall};
pub use transport::{Dispatcher, InlineDispatcher, RawPayload, Transport, Upload, WireError, WireRecord};
