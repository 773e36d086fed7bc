use crate::domain::ids::PatientId;
use crate::domain::phone::normalize_phone_for_match;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: PatientId,
    pub name: String,
    pub primary_phone: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Patient {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::EmptyPatientName);
        }

        if normalize_phone_for_match(&self.primary_phone).is_none() {
            return Err(CoreError::InvalidPhone(self.primary_phone.clone()));
        }

        Ok(())
    }
}

/// Collapses runs of whitespace so searches and display agree on one form.
pub fn normalize_patient_name(raw: &str) -> Result<String, CoreError> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return Err(CoreError::EmptyPatientName);
    }
    Ok(collapsed)
}
