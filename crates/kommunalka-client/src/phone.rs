/// Minimum raw input length accepted before a code is requested.
pub const MIN_PHONE_INPUT_LEN: usize = 10;

/// Longest raw phone input the login field accepts.
pub const MAX_PHONE_INPUT_LEN: usize = 18;

/// Length of the one-time code.
pub const CODE_LEN: usize = 4;

/// Normalize user input to the `+7XXXXXXXXXX` form the auth service keys on.
///
/// Non-digits are dropped. A leading `8` is the domestic trunk prefix and is
/// replaced by country code `7`; a leading `7` is already the country code;
/// anything else is a bare subscriber number. Input with no digits yields an
/// empty string.
pub fn normalize_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    if let Some(rest) = digits.strip_prefix('8') {
        format!("+7{rest}")
    } else if digits.starts_with('7') {
        format!("+{digits}")
    } else if digits.is_empty() {
        String::new()
    } else {
        format!("+7{digits}")
    }
}

/// The raw input must be at least [`MIN_PHONE_INPUT_LEN`] characters long.
pub fn is_plausible_phone_input(raw: &str) -> bool {
    raw.chars().count() >= MIN_PHONE_INPUT_LEN
}

/// Cap raw phone input at [`MAX_PHONE_INPUT_LEN`] characters.
pub fn clamp_phone_input(raw: &str) -> String {
    raw.chars().take(MAX_PHONE_INPUT_LEN).collect()
}

/// Keep digits only, at most [`CODE_LEN`] of them.
pub fn sanitize_code(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).take(CODE_LEN).collect()
}

pub fn is_complete_code(code: &str) -> bool {
    code.len() == CODE_LEN && code.chars().all(|c| c.is_ascii_digit())
}
