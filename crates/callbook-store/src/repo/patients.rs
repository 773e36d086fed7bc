use crate::error::{Result, StoreError};
use crate::query::{PatientQuery, PATIENT_COLUMNS};
use callbook_core::domain::{normalize_patient_name, normalize_phone_for_match, Patient, PatientId};
use callbook_core::CoreError;
use rusqlite::{params, params_from_iter, Connection};
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct PatientNew {
    pub name: String,
    pub primary_phone: String,
}

#[derive(Debug, Clone, Default)]
pub struct PatientUpdate {
    pub name: Option<String>,
    pub primary_phone: Option<String>,
}

/// A search hit with the time of the patient's latest logged call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientSearchRow {
    pub patient: Patient,
    pub last_call_at: Option<i64>,
}

impl PatientUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.primary_phone.is_none()
    }
}

pub struct PatientsRepo<'a> {
    conn: &'a Connection,
}

impl<'a> PatientsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn create(&self, now_utc: i64, input: PatientNew) -> Result<Patient> {
        let patient = Patient {
            id: PatientId::new(),
            name: normalize_patient_name(&input.name)?,
            primary_phone: input.primary_phone.trim().to_string(),
            created_at: now_utc,
            updated_at: now_utc,
        };
        patient.validate()?;
        let normalized = phone_key(&patient.primary_phone)?;

        self.conn.execute(
            "INSERT INTO patients (id, name, primary_phone, phone_normalized, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                patient.id.to_string(),
                patient.name,
                patient.primary_phone,
                normalized,
                patient.created_at,
                patient.updated_at,
            ],
        )?;

        Ok(patient)
    }

    pub fn get(&self, id: PatientId) -> Result<Option<Patient>> {
        get_inner(self.conn, id)
    }

    pub fn update(&self, now_utc: i64, id: PatientId, update: PatientUpdate) -> Result<Patient> {
        let tx = self.conn.unchecked_transaction()?;
        let mut patient =
            get_inner(&tx, id)?.ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if update.is_empty() {
            return Ok(patient);
        }

        if let Some(name) = update.name {
            patient.name = normalize_patient_name(&name)?;
        }
        if let Some(phone) = update.primary_phone {
            patient.primary_phone = phone.trim().to_string();
        }
        patient.updated_at = now_utc;
        patient.validate()?;
        let normalized = phone_key(&patient.primary_phone)?;

        tx.execute(
            "UPDATE patients
             SET name = ?2, primary_phone = ?3, phone_normalized = ?4, updated_at = ?5
             WHERE id = ?1;",
            params![
                id.to_string(),
                patient.name,
                patient.primary_phone,
                normalized,
                patient.updated_at,
            ],
        )?;
        tx.commit()?;
        Ok(patient)
    }

    /// Patients with call history are kept so their log stays intact.
    pub fn delete(&self, id: PatientId) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        let calls: i64 = tx.query_row(
            "SELECT COUNT(*) FROM call_records WHERE patient_id = ?1;",
            [id.to_string()],
            |row| row.get(0),
        )?;
        if calls > 0 {
            return Err(StoreError::PatientHasCalls(id.to_string()));
        }
        let deleted = tx.execute("DELETE FROM patients WHERE id = ?1;", [id.to_string()])?;
        if deleted == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        tx.commit()?;
        Ok(())
    }

    pub fn list_all(&self) -> Result<Vec<Patient>> {
        let rows = self.search(&PatientQuery::default(), None)?;
        Ok(rows.into_iter().map(|row| row.patient).collect())
    }

    pub fn search(
        &self,
        query: &PatientQuery,
        limit: Option<i64>,
    ) -> Result<Vec<PatientSearchRow>> {
        let compiled = query.to_sql(limit);
        let mut stmt = self.conn.prepare(&compiled.sql)?;
        let mut rows = stmt.query(params_from_iter(compiled.params))?;
        let mut results = Vec::new();
        while let Some(row) = rows.next()? {
            results.push(PatientSearchRow {
                patient: patient_from_row(row)?,
                last_call_at: row.get(5)?,
            });
        }
        Ok(results)
    }

    /// Exact match on the normalized primary phone.
    pub fn list_by_phone(&self, phone: &str) -> Result<Vec<Patient>> {
        let Some(normalized) = normalize_phone_for_match(phone) else {
            return Ok(Vec::new());
        };
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PATIENT_COLUMNS} FROM patients
             WHERE phone_normalized = ?1
             ORDER BY name COLLATE NOCASE ASC, created_at ASC;"
        ))?;
        let mut rows = stmt.query([normalized])?;
        let mut patients = Vec::new();
        while let Some(row) = rows.next()? {
            patients.push(patient_from_row(row)?);
        }
        Ok(patients)
    }
}

fn get_inner(conn: &Connection, id: PatientId) -> Result<Option<Patient>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PATIENT_COLUMNS} FROM patients WHERE id = ?1;"
    ))?;
    let mut rows = stmt.query([id.to_string()])?;
    if let Some(row) = rows.next()? {
        Ok(Some(patient_from_row(row)?))
    } else {
        Ok(None)
    }
}

fn phone_key(phone: &str) -> Result<String> {
    normalize_phone_for_match(phone)
        .ok_or_else(|| StoreError::Core(CoreError::InvalidPhone(phone.to_string())))
}

fn patient_from_row(row: &rusqlite::Row<'_>) -> Result<Patient> {
    let id_str: String = row.get(0)?;
    let id = PatientId::from_str(&id_str).map_err(|_| StoreError::InvalidId(id_str.clone()))?;
    Ok(Patient {
        id,
        name: row.get(1)?,
        primary_phone: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}
