use crate::domain::normalize_phone_for_match;
use crate::filter::ast::{PatientSearch, SearchExpr};
use crate::filter::FilterParseError;

pub fn parse_search(input: &str) -> Result<PatientSearch, FilterParseError> {
    let mut terms = Vec::new();

    for token in input.split_whitespace() {
        if let Some(phone_raw) = token.strip_prefix("phone:") {
            if phone_raw.is_empty() {
                return Err(FilterParseError::EmptyPhone);
            }
            let digits = normalize_phone_for_match(phone_raw)
                .map(|value| value.trim_start_matches('+').to_string())
                .filter(|value| !value.is_empty())
                .ok_or_else(|| FilterParseError::InvalidPhone(phone_raw.to_string()))?;
            terms.push(SearchExpr::Phone(digits));
        } else {
            terms.push(SearchExpr::Text(token.to_string()));
        }
    }

    if terms.is_empty() {
        return Err(FilterParseError::EmptyQuery);
    }

    Ok(SearchExpr::And(terms))
}
