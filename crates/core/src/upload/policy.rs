//! Upload policy table.
//!
//! Every upload context maps to exactly one storage path prefix and one media
//! class. The table is compiled into the binary; adding a context means adding
//! a variant and its rows below.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ValidationError;

/// Content types accepted for image contexts.
pub const IMAGE_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

/// Content types accepted for video contexts.
pub const VIDEO_CONTENT_TYPES: &[&str] = &["video/mp4", "video/webm", "video/quicktime"];

/// Class of media an upload context accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaClass {
    /// Still images.
    Image,
    /// Video clips.
    Video,
}

impl MediaClass {
    /// Content types belonging to this class.
    #[must_use]
    pub const fn content_types(self) -> &'static [&'static str] {
        match self {
            Self::Image => IMAGE_CONTENT_TYPES,
            Self::Video => VIDEO_CONTENT_TYPES,
        }
    }
}

/// Named category of client-initiated upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadContext {
    /// Video attached to a post.
    PostVideo,
    /// Thumbnail for a post.
    PostThumbnail,
    /// Twynlights video.
    TwynlightsVideo,
    /// Twynlights thumbnail.
    TwynlightsThumbnail,
    /// Profile display picture.
    ProfileDp,
    /// Profile video.
    ProfileVideo,
    /// Profile video thumbnail.
    ProfileThumbnail,
    /// Team logo.
    TeamLogo,
    /// League logo.
    LeagueLogo,
}

impl UploadContext {
    /// Every known context, in table order.
    pub const ALL: [Self; 9] = [
        Self::PostVideo,
        Self::PostThumbnail,
        Self::TwynlightsVideo,
        Self::TwynlightsThumbnail,
        Self::ProfileDp,
        Self::ProfileVideo,
        Self::ProfileThumbnail,
        Self::TeamLogo,
        Self::LeagueLogo,
    ];

    /// Wire identifier of this context.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PostVideo => "post_video",
            Self::PostThumbnail => "post_thumbnail",
            Self::TwynlightsVideo => "twynlights_video",
            Self::TwynlightsThumbnail => "twynlights_thumbnail",
            Self::ProfileDp => "profile_dp",
            Self::ProfileVideo => "profile_video",
            Self::ProfileThumbnail => "profile_thumbnail",
            Self::TeamLogo => "team_logo",
            Self::LeagueLogo => "league_logo",
        }
    }

    /// Storage path prefix objects of this context are written under.
    #[must_use]
    pub const fn path_prefix(self) -> &'static str {
        match self {
            Self::PostVideo => "post/video",
            Self::PostThumbnail => "post/thumbnail",
            Self::TwynlightsVideo => "twynlights/video",
            Self::TwynlightsThumbnail => "twynlights/thumbnail",
            Self::ProfileDp => "profile/profile-dp",
            Self::ProfileVideo => "profile/profile-video",
            Self::ProfileThumbnail => "profile/thumbnail",
            Self::TeamLogo => "team/team-logo",
            Self::LeagueLogo => "league/league-logo",
        }
    }

    /// Media class accepted by this context.
    #[must_use]
    pub const fn media_class(self) -> MediaClass {
        match self {
            Self::PostVideo | Self::TwynlightsVideo | Self::ProfileVideo => MediaClass::Video,
            Self::PostThumbnail
            | Self::TwynlightsThumbnail
            | Self::ProfileDp
            | Self::ProfileThumbnail
            | Self::TeamLogo
            | Self::LeagueLogo => MediaClass::Image,
        }
    }

    /// Content types accepted by this context.
    #[must_use]
    pub const fn allowed_content_types(self) -> &'static [&'static str] {
        self.media_class().content_types()
    }

    /// Check whether `content_type` is accepted by this context.
    ///
    /// Comparison is exact; no case folding or parameter stripping.
    #[must_use]
    pub fn allows(self, content_type: &str) -> bool {
        self.allowed_content_types().contains(&content_type)
    }

    /// Full policy row for this context.
    #[must_use]
    pub const fn policy(self) -> UploadPolicy {
        UploadPolicy {
            context: self,
            path_prefix: self.path_prefix(),
            allowed_content_types: self.allowed_content_types(),
        }
    }
}

impl fmt::Display for UploadContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UploadContext {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|context| context.as_str() == s)
            .ok_or(ValidationError::UnknownContext)
    }
}

/// One row of the policy table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPolicy {
    /// Context the row belongs to.
    pub context: UploadContext,
    /// Storage path prefix, without trailing slash.
    pub path_prefix: &'static str,
    /// Accepted content types.
    pub allowed_content_types: &'static [&'static str],
}

/// Look up the policy for a context identifier.
///
/// Returns `None` for identifiers absent from the table.
#[must_use]
pub fn lookup(identifier: &str) -> Option<UploadPolicy> {
    identifier.parse::<UploadContext>().ok().map(UploadContext::policy)
}
