use crate::domain::ids::{CallRecordId, PatientId, UserId};
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallOutcome {
    Reached,
    LeftVoicemail,
    CouldNotReach,
}

impl CallOutcome {
    pub const fn as_str(self) -> &'static str {
        match self {
            CallOutcome::Reached => "reached",
            CallOutcome::LeftVoicemail => "left_voicemail",
            CallOutcome::CouldNotReach => "could_not_reach",
        }
    }

    /// Text of the modal action that records this outcome.
    pub const fn action_label(self) -> &'static str {
        match self {
            CallOutcome::Reached => "I reached the patient",
            CallOutcome::LeftVoicemail => "I left a voicemail for the patient",
            CallOutcome::CouldNotReach => "I couldn't reach the patient",
        }
    }

    /// Text shown for this outcome in a call log row.
    pub const fn log_label(self) -> &'static str {
        match self {
            CallOutcome::Reached => "Reached patient",
            CallOutcome::LeftVoicemail => "Left voicemail",
            CallOutcome::CouldNotReach => "Couldn't reach patient",
        }
    }

    pub const fn all() -> &'static [CallOutcome] {
        &[
            CallOutcome::Reached,
            CallOutcome::LeftVoicemail,
            CallOutcome::CouldNotReach,
        ]
    }
}

impl fmt::Display for CallOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CallOutcome {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let value = raw.trim().to_ascii_lowercase().replace('-', "_");
        match value.as_str() {
            "reached" | "reached_patient" => Ok(CallOutcome::Reached),
            "left_voicemail" | "voicemail" => Ok(CallOutcome::LeftVoicemail),
            "could_not_reach" | "couldnt_reach" | "unreachable" => Ok(CallOutcome::CouldNotReach),
            _ => Err(CoreError::InvalidOutcome(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRecord {
    pub id: CallRecordId,
    pub patient_id: PatientId,
    pub user_id: UserId,
    pub occurred_at: i64,
    pub created_at: i64,
    pub outcome: CallOutcome,
}
