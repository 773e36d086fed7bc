//! Navigation state of a call: which view is showing and whether the call
//! modal is open.

use crate::domain::{CallOutcome, Patient, PatientId};
use crate::error::CoreError;
use serde::{Deserialize, Serialize};

pub const HOME_HEADING: &str = "Build your call list";
pub const PATIENT_HEADING: &str = "Patient information";
pub const CALL_LOG_HEADING: &str = "Call Log";

/// Where the user lands after recording a reached call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReachedRedirect {
    #[default]
    Patient,
    Home,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", content = "patient_id", rename_all = "snake_case")]
pub enum View {
    Home,
    PatientDetail(PatientId),
}

impl View {
    pub const fn heading(self) -> &'static str {
        match self {
            View::Home => HOME_HEADING,
            View::PatientDetail(_) => PATIENT_HEADING,
        }
    }

    pub fn after_outcome(
        outcome: CallOutcome,
        patient_id: PatientId,
        redirect: ReachedRedirect,
    ) -> Self {
        match (outcome, redirect) {
            (CallOutcome::Reached, ReachedRedirect::Patient) => View::PatientDetail(patient_id),
            _ => View::Home,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallModal {
    pub patient_id: PatientId,
    pub patient_name: String,
    pub phone: String,
}

impl CallModal {
    pub fn open(patient: &Patient) -> Self {
        Self {
            patient_id: patient.id,
            patient_name: patient.name.clone(),
            phone: patient.primary_phone.clone(),
        }
    }

    pub fn prompt(&self) -> String {
        format!("Call {} now", self.patient_name)
    }

    pub fn actions(&self) -> &'static [CallOutcome] {
        CallOutcome::all()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub patient_id: PatientId,
    pub outcome: CallOutcome,
    pub view: View,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open(CallModal),
}

impl ModalState {
    pub fn is_open(&self) -> bool {
        matches!(self, ModalState::Open(_))
    }

    /// Picks an outcome action, closing the modal. Any of the three outcomes
    /// is terminal.
    pub fn select(
        &mut self,
        outcome: CallOutcome,
        redirect: ReachedRedirect,
    ) -> Result<Selection, CoreError> {
        let modal = match std::mem::take(self) {
            ModalState::Open(modal) => modal,
            ModalState::Closed => return Err(CoreError::ModalClosed),
        };
        Ok(Selection {
            patient_id: modal.patient_id,
            outcome,
            view: View::after_outcome(outcome, modal.patient_id, redirect),
        })
    }
}
