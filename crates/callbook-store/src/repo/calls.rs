use crate::error::{Result, StoreError};
use crate::repo::session::current_user_inner;
use callbook_core::domain::{CallOutcome, CallRecord, CallRecordId, PatientId, User, UserId};
use callbook_core::rules::ensure_not_future;
use rusqlite::{params, Connection, OptionalExtension};
use std::str::FromStr;
use tracing::debug;

struct CallRecordNew {
    patient_id: PatientId,
    user_id: UserId,
    occurred_at: i64,
    created_at: i64,
    outcome: CallOutcome,
}

/// A call log row: the record plus the caller's display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallLogRow {
    pub record: CallRecord,
    pub user_name: String,
}

pub struct CallsRepo<'a> {
    conn: &'a Connection,
}

impl<'a> CallsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Records a call on behalf of the logged-in user. `occurred_at`
    /// defaults to `now_utc` and may not be later than it.
    pub fn record_for_session(
        &self,
        now_utc: i64,
        patient_id: PatientId,
        outcome: CallOutcome,
        occurred_at: Option<i64>,
    ) -> Result<(CallRecord, User)> {
        let occurred_at = ensure_not_future(now_utc, occurred_at.unwrap_or(now_utc))?;

        let tx = self.conn.unchecked_transaction()?;
        let user = current_user_inner(&tx)?.ok_or(StoreError::NotAuthenticated)?;
        ensure_patient_exists(&tx, patient_id)?;
        let record = insert_record(
            &tx,
            CallRecordNew {
                patient_id,
                user_id: user.id,
                occurred_at,
                created_at: now_utc,
                outcome,
            },
        )?;
        tx.commit()?;

        debug!(
            call = %record.id,
            patient = %patient_id,
            user = %user.id,
            outcome = outcome.as_str(),
            "call recorded"
        );
        Ok((record, user))
    }

    /// Every call for the patient, most recent first. Calls with the same
    /// timestamp keep reverse insertion order.
    pub fn list_for_patient(&self, patient_id: PatientId) -> Result<Vec<CallLogRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT c.id, c.patient_id, c.user_id, c.occurred_at, c.created_at, c.outcome, u.name
             FROM call_records c
             INNER JOIN users u ON u.id = c.user_id
             WHERE c.patient_id = ?1
             ORDER BY c.occurred_at DESC, c.rowid DESC;",
        )?;
        let mut rows = stmt.query([patient_id.to_string()])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(log_row_from_row(row)?);
        }
        Ok(items)
    }
}

fn ensure_patient_exists(conn: &Connection, patient_id: PatientId) -> Result<()> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM patients WHERE id = ?1;",
            [patient_id.to_string()],
            |row| row.get(0),
        )
        .optional()?;
    match found {
        Some(_) => Ok(()),
        None => Err(StoreError::NotFound(patient_id.to_string())),
    }
}

fn insert_record(conn: &Connection, input: CallRecordNew) -> Result<CallRecord> {
    let id = CallRecordId::new();
    conn.execute(
        "INSERT INTO call_records (id, patient_id, user_id, occurred_at, created_at, outcome)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
        params![
            id.to_string(),
            input.patient_id.to_string(),
            input.user_id.to_string(),
            input.occurred_at,
            input.created_at,
            input.outcome.as_str(),
        ],
    )?;

    Ok(CallRecord {
        id,
        patient_id: input.patient_id,
        user_id: input.user_id,
        occurred_at: input.occurred_at,
        created_at: input.created_at,
        outcome: input.outcome,
    })
}

fn parse_outcome(raw: &str) -> Result<CallOutcome> {
    CallOutcome::all()
        .iter()
        .copied()
        .find(|outcome| outcome.as_str() == raw)
        .ok_or_else(|| StoreError::InvalidOutcome(raw.to_string()))
}

fn log_row_from_row(row: &rusqlite::Row<'_>) -> Result<CallLogRow> {
    let id_str: String = row.get(0)?;
    let id = CallRecordId::from_str(&id_str).map_err(|_| StoreError::InvalidId(id_str.clone()))?;
    let patient_id_str: String = row.get(1)?;
    let patient_id = PatientId::from_str(&patient_id_str)
        .map_err(|_| StoreError::InvalidId(patient_id_str.clone()))?;
    let user_id_str: String = row.get(2)?;
    let user_id =
        UserId::from_str(&user_id_str).map_err(|_| StoreError::InvalidId(user_id_str.clone()))?;
    let outcome_raw: String = row.get(5)?;
    Ok(CallLogRow {
        record: CallRecord {
            id,
            patient_id,
            user_id,
            occurred_at: row.get(3)?,
            created_at: row.get(4)?,
            outcome: parse_outcome(&outcome_raw)?,
        },
        user_name: row.get(6)?,
    })
}
