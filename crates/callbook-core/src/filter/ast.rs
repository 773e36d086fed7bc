#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchExpr {
    Text(String),
    /// Normalized digits of a phone fragment.
    Phone(String),
    And(Vec<SearchExpr>),
}

pub type PatientSearch = SearchExpr;
