mod ast;
mod parser;

use thiserror::Error;

pub use ast::{PatientSearch, SearchExpr};
pub use parser::parse_search;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterParseError {
    #[error("search query is empty")]
    EmptyQuery,
    #[error("empty phone token")]
    EmptyPhone,
    #[error("invalid phone token: {0}")]
    InvalidPhone(String),
}
