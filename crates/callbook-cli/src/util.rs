use crate::error::invalid_input;
use anyhow::Result;
use callbook_config::DisplayConfig;
use callbook_core::domain::{call_key, CallOutcome, PatientId};
use callbook_core::dto::CallLogEntryDto;
use callbook_core::flow::CALL_LOG_HEADING;
use callbook_core::time::format_local;
use callbook_store::repo::CallLogRow;
use std::str::FromStr;

pub fn parse_patient_id(raw: &str) -> Result<PatientId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(invalid_input("patient id cannot be empty"));
    }
    PatientId::from_str(trimmed)
        .map_err(|_| invalid_input(format!("invalid patient id: {}", trimmed)))
}

/// Value accepted by `--outcome` for this outcome.
pub fn outcome_flag(outcome: CallOutcome) -> String {
    outcome.as_str().replace('_', "-")
}

pub fn call_log_entry(row: &CallLogRow, display: &DisplayConfig) -> CallLogEntryDto {
    let record = &row.record;
    CallLogEntryDto {
        id: record.id,
        occurred_at: record.occurred_at,
        date: format_local(record.occurred_at, &display.date_format),
        time: format_local(record.occurred_at, &display.time_format),
        outcome: record.outcome,
        outcome_label: record.outcome.log_label().to_string(),
        user_id: record.user_id,
        user_name: row.user_name.clone(),
    }
}

pub fn print_call_log(entries: &[CallLogEntryDto]) {
    println!("{}", CALL_LOG_HEADING);
    if entries.is_empty() {
        println!("  no calls logged");
        return;
    }
    for entry in entries {
        println!(
            "  {}  {}  {}  {}",
            entry.date, entry.time, entry.outcome_label, entry.user_name
        );
    }
}

pub fn print_record_call_hint(phone: &str) {
    println!();
    println!("record a call: callbook call {}", call_key(phone));
}
