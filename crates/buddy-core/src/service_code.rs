//! Error codes returned by the Buddy web service.
//!
//! The service answers a failed call with a bare code string instead of a
//! payload. The transport recognises these codes and reports them as
//! [`WireError::Service`](crate::transport::WireError::Service); operations
//! that treat a code as benign say so through a
//! [`SentinelPolicy`](crate::adapter::SentinelPolicy).

use std::fmt;

use serde::{Deserialize, Serialize};

/// A remote error code, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceCode(String);

impl ServiceCode {
    /// The generic "operation did nothing" answer used by update/delete endpoints.
    pub const NEGATIVE_ONE: &'static str = "-1";

    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn negative_one() -> Self {
        Self::new(Self::NEGATIVE_ONE)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if `body` is a code the service uses to report failure.
    pub fn is_known(body: &str) -> bool {
        body == Self::NEGATIVE_ONE || KNOWN_CODES.contains(&body)
    }
}

impl fmt::Display for ServiceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ServiceCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Codes the service is documented to return in place of a result.
pub const KNOWN_CODES: &[&str] = &[
    "BadParameter",
    "BadUserFailure",
    "EmptyPhotoAlbumNameNotAllowed",
    "GroupNameCannotBeEmpty",
    "GroupAlreadyExists",
    "GroupOwnerSecurityError",
    "IdentityValueAlreadyExists",
    "InvalidApplicationCredentials",
    "InvalidFlagValue",
    "InvalidPhotoAlbumID",
    "InvalidPhotoID",
    "InvalidUsernameOrPassword",
    "InvalidUserToken",
    "NoSuchBlob",
    "NoSuchVideo",
    "PhotoAlbumDoesNotExist",
    "PhotoAlbumNameAlreadyInUse",
    "ServiceErrorNegativeOne",
    "UserAccountDisabled",
    "UserEmailAvailable",
    "UserEmailTaken",
    "UserNameAlreadyInUse",
    "UserNameAvailble",
    "UserNameNotFound",
    "UserTokenNotRecognized",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert!(ServiceCode::is_known("-1"));
        assert!(ServiceCode::is_known("UserTokenNotRecognized"));
        assert!(!ServiceCode::is_known("1"));
        assert!(!ServiceCode::is_known("usertokennotrecognized"));
    }

    #[test]
    fn test_display_is_verbatim() {
        assert_eq!(ServiceCode::negative_one().to_string(), "-1");
    }
}
