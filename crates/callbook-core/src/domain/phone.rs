pub fn normalize_phone_for_match(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut out = String::new();
    let mut saw_digit = false;

    if trimmed.starts_with('+') {
        out.push('+');
    }

    for ch in trimmed.chars() {
        if ch.is_ascii_digit() {
            out.push(ch);
            saw_digit = true;
            continue;
        }

        if matches!(ch, 'x' | 'X' | '#' | ';' | ',') {
            if !saw_digit {
                return None;
            }
            break;
        }
    }

    if !saw_digit {
        return None;
    }

    Some(out)
}

const CALL_KEY_PREFIX: &str = "call-";

/// Affordance key a search result exposes for opening the call modal.
pub fn call_key(phone: &str) -> String {
    format!("{}{}", CALL_KEY_PREFIX, phone.trim())
}

/// Accepts either a bare phone number or a `call-`/`#call-` key.
pub fn strip_call_key(raw: &str) -> &str {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('#').unwrap_or(trimmed);
    trimmed.strip_prefix(CALL_KEY_PREFIX).unwrap_or(trimmed)
}
