use crate::error::CoreError;
use chrono::format::{Item, StrftimeItems};

pub fn ensure_not_future(now_utc: i64, timestamp: i64) -> Result<i64, CoreError> {
    if timestamp > now_utc {
        Err(CoreError::TimestampInFuture)
    } else {
        Ok(timestamp)
    }
}

pub fn validate_display_format(format: &str) -> Result<(), CoreError> {
    if format.trim().is_empty() {
        return Err(CoreError::InvalidDisplayFormat(format.to_string()));
    }
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(CoreError::InvalidDisplayFormat(format.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{ensure_not_future, validate_display_format};

    #[test]
    fn ensure_not_future_rejects_later_timestamp() {
        let now = 1_700_000_000;
        assert!(ensure_not_future(now, now + 1).is_err());
    }

    #[test]
    fn ensure_not_future_accepts_now_or_earlier() {
        let now = 1_700_000_000;
        assert_eq!(ensure_not_future(now, now), Ok(now));
        assert_eq!(ensure_not_future(now, now - 60), Ok(now - 60));
    }

    #[test]
    fn display_format_accepts_strftime() {
        assert!(validate_display_format("%m/%d/%Y").is_ok());
        assert!(validate_display_format("%-I:%M %P").is_ok());
    }

    #[test]
    fn display_format_rejects_unknown_specifier() {
        assert!(validate_display_format("%Q").is_err());
        assert!(validate_display_format(" ").is_err());
    }
}
