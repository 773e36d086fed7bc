use callbook_core::filter::{PatientSearch, SearchExpr};
use rusqlite::types::Value;

pub const PATIENT_COLUMNS: &str = "id, name, primary_phone, created_at, updated_at";

/// Most recent `occurred_at` for the row's patient, NULL when never called.
const LAST_CALL_COLUMN: &str = "(SELECT MAX(call_records.occurred_at) FROM call_records
         WHERE call_records.patient_id = patients.id) AS last_call_at";

#[derive(Debug, Default, Clone)]
pub struct PatientQuery {
    pub text_terms: Vec<String>,
    pub phone_terms: Vec<String>,
}

pub struct SqlQuery {
    pub sql: String,
    pub params: Vec<Value>,
}

impl PatientQuery {
    pub fn from_search(search: &PatientSearch) -> Self {
        let mut query = PatientQuery::default();
        query.push_expr(search);
        query
    }

    fn push_expr(&mut self, expr: &SearchExpr) {
        match expr {
            SearchExpr::Text(text) => self.text_terms.push(text.to_string()),
            SearchExpr::Phone(digits) => self.phone_terms.push(digits.to_string()),
            SearchExpr::And(terms) => {
                for term in terms {
                    self.push_expr(term);
                }
            }
        }
    }

    pub fn to_sql(&self, limit: Option<i64>) -> SqlQuery {
        let mut clauses: Vec<String> = Vec::new();
        let mut params: Vec<Value> = Vec::new();

        for term in &self.text_terms {
            clauses.push("name LIKE ? ESCAPE '\\'".to_string());
            params.push(Value::from(contains_pattern(term)));
        }

        for digits in &self.phone_terms {
            clauses.push("phone_normalized LIKE ? ESCAPE '\\'".to_string());
            params.push(Value::from(contains_pattern(digits)));
        }

        let mut sql = format!("SELECT {PATIENT_COLUMNS}, {LAST_CALL_COLUMN} FROM patients");

        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }

        sql.push_str(" ORDER BY name COLLATE NOCASE ASC, created_at ASC");

        if let Some(limit) = limit {
            sql.push_str(" LIMIT ?");
            params.push(Value::from(limit));
        }

        SqlQuery { sql, params }
    }
}

/// `%term%` with the term's own LIKE wildcards taken literally.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
