//! Domain entities hydrated from wire records.
//!
//! Every entity is an immutable snapshot of one response. Fetching again
//! yields a new value; nothing here refreshes itself or performs I/O.

mod app;
mod commerce;
mod game;
mod geo;
mod hydrate;
mod identity;
mod media;
mod messaging;
mod metadata;
mod user;

pub use app::{ApplicationStatistics, NotificationGroup, RegisteredDevice};
pub use commerce::{Receipt, StoreItem};
pub use game::{GamePlayer, GameScore, GameStateItem};
pub use geo::{Distance, GeoPoint};
pub use hydrate::{Hydrate, HydrateAt, HydrationError, parse_timestamp};
pub use identity::{IdentityItem, IdentityItemSearchResult};
pub use media::{Blob, PhotoAlbum, Picture, StoredFile, Video, VirtualAlbum};
pub use messaging::{FriendRequest, GroupMessage, Message, MessageGroup};
pub use metadata::{MetadataItem, MetadataSum};
pub use user::{CheckInLocation, User, UserGender, UserProfile, UserStatus};

#[cfg(test)]
pub(crate) use user::user_record;
