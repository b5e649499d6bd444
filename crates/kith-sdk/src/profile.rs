use kith_recommend::MatchReason;
use kith_types::MemberId;
use serde::{Deserialize, Serialize};

/// The attributes of a member that drive set assignment.
///
/// Accounts themselves are managed by the identity service; Kith is handed
/// this view of them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberProfile {
    pub id: MemberId,
    pub username: String,
    pub school: String,
    pub hometown: String,
}

impl MemberProfile {
    pub fn new(
        id: MemberId,
        username: impl Into<String>,
        school: impl Into<String>,
        hometown: impl Into<String>,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            school: school.into(),
            hometown: hometown.into(),
        }
    }

    /// Human-readable justification for a recommendation shown to this
    /// member.
    pub fn explain(&self, reason: MatchReason) -> String {
        match reason {
            MatchReason::Both => {
                format!("Also goes to {} and is from {}", self.school, self.hometown)
            }
            MatchReason::OnlyA => format!("Also goes to {}", self.school),
            MatchReason::OnlyB => format!("Also is from {}", self.hometown),
        }
    }
}

/// One recommended member with the reason they were picked.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub member: MemberId,
    pub reason: MatchReason,
    pub explanation: String,
}
