// Format patterns used by the string checks

use once_cell::sync::Lazy;
use regex::Regex;

pub(crate) static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$")
        .expect("email pattern is valid")
});

pub(crate) static URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").expect("url pattern is valid"));

pub(crate) static UUID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
        .expect("uuid pattern is valid")
});

pub(crate) fn is_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

pub(crate) fn is_url(value: &str) -> bool {
    URL_REGEX.is_match(value)
}

pub(crate) fn is_uuid(value: &str) -> bool {
    UUID_REGEX.is_match(value)
}

pub(crate) fn is_alphanumeric(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric())
}
