//! Remote operations of the Buddy Platform, grouped by service.
//!
//! Start from [`BuddyClient`] for application-scope calls and the login
//! flows. A successful login yields an [`AuthenticatedUser`], which hands out
//! the user-scope services.
//!
//! Every operation validates its arguments before any I/O and returns a
//! [`PendingCall`](buddy_core::PendingCall) that can be awaited or given a
//! callback.

pub mod client;
pub mod commerce;
mod context;
pub mod devices;
pub mod files;
pub mod friends;
pub mod game;
pub mod identity;
pub mod messages;
pub mod metadata;
pub mod methods;
pub mod notifications;
pub mod pictures;
pub mod search;
pub mod user;

pub use client::{BuddyClient, NewUser};
pub use commerce::{Commerce, ReceiptRequest};
pub use devices::{CrashReport, Devices};
pub use files::{Blobs, FileInfo, FileSearch, StoredFiles, Videos};
pub use friends::{FriendRequests, Friends};
pub use game::{
    GameBoards, GamePlayers, GameScores, GameState, NewScore, PlayerInfo, PlayerSearch,
    ScoreSearch,
};
pub use identity::Identity;
pub use messages::{MessageGroups, Messages};
pub use metadata::{Metadata, MetadataSearch};
pub use notifications::{
    AndroidPush, ApplePush, Notifications, PushChannel, PushMessage, Win8Push, WindowsPhonePush,
    channel_for,
};
pub use pictures::{NewPicture, PhotoAlbums, VirtualAlbums};
pub use search::NearbySearch;
pub use user::{AuthenticatedUser, ProfileUpdate, UserSearch};
