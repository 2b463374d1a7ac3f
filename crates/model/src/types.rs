//! Domain value types carried as outcome payloads.
//!
//! These are immutable values with no behaviour beyond construction-time
//! validation. Field names are camelCase on the wire to match the PartyRun
//! server.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{BattleId, MemberId, NicknameError, SingleId};

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

/// Identity token obtained from Google sign-in on the device.
///
/// `None` models a sign-in attempt where the identity provider returned no
/// token; such a request is rejected before reaching the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleIdToken {
    pub id_token: Option<String>,
}

impl GoogleIdToken {
    pub fn new(id_token: Option<String>) -> Self {
        Self { id_token }
    }

    /// Returns the token if it is present and not blank.
    pub fn usable_token(&self) -> Option<&str> {
        self.id_token
            .as_deref()
            .filter(|token| !token.trim().is_empty())
    }
}

/// Access/refresh token pair issued by the server after sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInToken {
    pub access_token: String,
    pub refresh_token: String,
}

// ---------------------------------------------------------------------------
// Member
// ---------------------------------------------------------------------------

/// Profile of the signed-in member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: MemberId,
    #[serde(rename = "name")]
    pub nick_name: String,
    pub profile_image: String,
}

/// A validated display name: between 1 and [`Nickname::MAX_CHARS`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Nickname(String);

impl Nickname {
    /// Longest accepted nickname, counted in characters.
    pub const MAX_CHARS: usize = 6;

    /// Validates `value` as a nickname.
    ///
    /// Surrounding whitespace is not trimmed; it counts toward the length.
    pub fn new(value: impl Into<String>) -> Result<Self, NicknameError> {
        let value = value.into();
        let length = value.chars().count();
        if length == 0 {
            return Err(NicknameError::Empty);
        }
        if length > Self::MAX_CHARS {
            return Err(NicknameError::TooLong {
                length,
                max: Self::MAX_CHARS,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Nickname {
    type Error = NicknameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Nickname> for String {
    fn from(nickname: Nickname) -> Self {
        nickname.0
    }
}

impl std::fmt::Display for Nickname {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A pre-encoded profile image ready for upload.
///
/// Decoding, resizing and compression happen before this value is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileImage {
    pub bytes: Vec<u8>,
    pub file_name: Option<String>,
    pub content_type: String,
}

impl ProfileImage {
    /// Content type sent when the caller does not know the exact image format.
    pub const DEFAULT_CONTENT_TYPE: &'static str = "image/*";

    pub fn new(bytes: Vec<u8>, file_name: Option<String>) -> Self {
        Self {
            bytes,
            file_name,
            content_type: Self::DEFAULT_CONTENT_TYPE.to_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

/// Target distance, in meters, a member registers to be matched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct RunningDistance(u32);

impl RunningDistance {
    /// Distances the server runs matchmaking queues for.
    pub const SUPPORTED_METERS: [u32; 4] = [1_000, 3_000, 5_000, 10_000];

    /// Returns `None` if no matchmaking queue exists for `meters`.
    pub fn new(meters: u32) -> Option<Self> {
        Self::SUPPORTED_METERS
            .contains(&meters)
            .then_some(Self(meters))
    }

    pub fn meters(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for RunningDistance {
    type Error = String;

    fn try_from(meters: u32) -> Result<Self, Self::Error> {
        Self::new(meters).ok_or_else(|| format!("unsupported running distance: {meters}m"))
    }
}

impl From<RunningDistance> for u32 {
    fn from(distance: RunningDistance) -> Self {
        distance.0
    }
}

/// A member's answer to a match proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDecision {
    #[serde(rename = "isJoin")]
    pub is_joined: bool,
}

impl MatchDecision {
    pub fn accept() -> Self {
        Self { is_joined: true }
    }

    pub fn decline() -> Self {
        Self { is_joined: false }
    }
}

/// Server acknowledgement of a matching request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStatus {
    pub message: String,
}

// ---------------------------------------------------------------------------
// Running records
// ---------------------------------------------------------------------------

/// Elapsed running time split into clock components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RunningTime {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl RunningTime {
    pub fn from_seconds(total: u64) -> Self {
        Self {
            hours: u32::try_from(total / 3_600).unwrap_or(u32::MAX),
            minutes: ((total % 3_600) / 60) as u32,
            seconds: (total % 60) as u32,
        }
    }

    pub fn total_seconds(self) -> u64 {
        u64::from(self.hours) * 3_600 + u64::from(self.minutes) * 60 + u64::from(self.seconds)
    }
}

impl std::fmt::Display for RunningTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Lifetime totals shown at the top of the "my page" screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComprehensiveRunRecord {
    /// Average pace in seconds per kilometer.
    pub average_pace: f64,
    /// Total distance in meters.
    pub total_distance: f64,
    pub total_running_time: RunningTime,
}

/// One completed solo run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleRunningRecord {
    pub id: SingleId,
    pub start_time: DateTime<Utc>,
    pub running_time: RunningTime,
    /// Distance in meters.
    pub distance: f64,
}

/// One completed battle, from the signed-in member's point of view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleRunningRecord {
    pub id: BattleId,
    pub start_time: DateTime<Utc>,
    pub running_time: RunningTime,
    /// Distance in meters.
    pub distance: f64,
    /// Finishing position, starting at 1.
    pub rank: u32,
}

/// Both halves of the running history, as one observable aggregate.
///
/// A half is `None` until it has been fetched at least once; `Some(vec![])`
/// means the server reported no runs of that kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombinedRunningHistory {
    pub single: Option<Vec<SingleRunningRecord>>,
    pub battle: Option<Vec<BattleRunningRecord>>,
}

impl CombinedRunningHistory {
    /// No run recorded in either half, whether fetched or not.
    pub fn is_empty(&self) -> bool {
        self.single.as_ref().map_or(true, Vec::is_empty)
            && self.battle.as_ref().map_or(true, Vec::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::empty("", false)]
    #[case::single_char("r", true)]
    #[case::at_limit("러너123", true)]
    #[case::six_multibyte("가나다라마바", true)]
    #[case::too_long("seven77", false)]
    fn nickname_length_rules(#[case] value: &str, #[case] valid: bool) {
        assert_eq!(Nickname::new(value).is_ok(), valid, "nickname {value:?}");
    }

    #[test]
    fn nickname_errors_describe_the_violation() {
        assert_eq!(Nickname::new(""), Err(NicknameError::Empty));
        assert_eq!(
            Nickname::new("abcdefgh"),
            Err(NicknameError::TooLong { length: 8, max: 6 })
        );
    }

    #[test]
    fn blank_google_token_is_not_usable() {
        assert_eq!(GoogleIdToken::new(None).usable_token(), None);
        assert_eq!(GoogleIdToken::new(Some("  ".into())).usable_token(), None);
        assert_eq!(GoogleIdToken::new(Some("abc".into())).usable_token(), Some("abc"));
    }

    #[test]
    fn sign_in_token_uses_camel_case_on_the_wire() {
        let token: SignInToken =
            serde_json::from_str(r#"{"accessToken":"a","refreshToken":"r"}"#).unwrap();
        assert_eq!(token.access_token, "a");
        assert_eq!(token.refresh_token, "r");
    }

    #[test]
    fn running_distance_only_accepts_queue_distances() {
        assert_eq!(RunningDistance::new(5_000).map(RunningDistance::meters), Some(5_000));
        assert!(RunningDistance::new(4_200).is_none());
        assert!(serde_json::from_str::<RunningDistance>("4200").is_err());
    }

    #[test]
    fn running_time_splits_seconds() {
        let time = RunningTime::from_seconds(3_725);
        assert_eq!(time, RunningTime { hours: 1, minutes: 2, seconds: 5 });
        assert_eq!(time.total_seconds(), 3_725);
        assert_eq!(time.to_string(), "01:02:05");
    }

    #[test]
    fn match_decision_serialises_join_flag() {
        let json = serde_json::to_value(MatchDecision::accept()).unwrap();
        assert_eq!(json, serde_json::json!({ "isJoin": true }));
    }
}
