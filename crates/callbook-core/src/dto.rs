use crate::domain::{CallOutcome, CallRecordId, PatientId, UserId};
use crate::flow::View;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientSearchItemDto {
    pub id: PatientId,
    pub name: String,
    pub primary_phone: String,
    pub call_key: String,
    pub last_call_at: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallActionDto {
    pub outcome: CallOutcome,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallModalDto {
    pub state: String,
    pub patient_id: PatientId,
    pub prompt: String,
    pub phone: String,
    pub actions: Vec<CallActionDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallLogEntryDto {
    pub id: CallRecordId,
    pub occurred_at: i64,
    pub date: String,
    pub time: String,
    pub outcome: CallOutcome,
    pub outcome_label: String,
    pub user_id: UserId,
    pub user_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallResultDto {
    pub call: CallLogEntryDto,
    pub modal: String,
    pub view: View,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientDetailDto {
    pub id: PatientId,
    pub name: String,
    pub primary_phone: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub call_log: Vec<CallLogEntryDto>,
}
