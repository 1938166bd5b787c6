//! Format predicates.
//!
//! `ipv4`, `ipv6`, `hostname`, `json-pointer`, `date`, `date-time` and `time`
//! are built in (regex- or `chrono`-based, mirroring the teacher crate's
//! `checks.rs`). `uri`, `uri-reference`, `uri-template` and `email` are
//! host-supplied: a process-wide registry the embedding application populates
//! at startup, matching `spec.md` §6's `defaultValidators` lookup table. A
//! format with no registered predicate behaves as always-false.
use chrono::{DateTime, NaiveDate};
use lazy_static::lazy_static;
use parking_lot::RwLock;
use regex::Regex;
use std::{collections::HashMap, net::IpAddr, str::FromStr, sync::Arc};

/// A host-supplied format predicate: `(string) -> bool`.
pub type FormatPredicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

lazy_static! {
    static ref REGISTRY: RwLock<HashMap<String, FormatPredicate>> = RwLock::new(HashMap::new());
    static ref HOSTNAME_LABEL_RE: Regex = Regex::new(r"^[A-Za-z0-9]([A-Za-z0-9\-]*[A-Za-z0-9])?\z").unwrap();
    static ref JSON_POINTER_RE: Regex = Regex::new(r"^(/([^/~]|~0|~1)*)*\z").unwrap();
    static ref TIME_RE: Regex = Regex::new(
        r"^([01][0-9]|2[0-3]):([0-5][0-9]):([0-5][0-9])(\.[0-9]+)?([Zz]|[+\-]([01][0-9]|2[0-3]):[0-5][0-9])?\z"
    )
    .unwrap();
}

/// Register a predicate for a host-supplied format tag (`uri`,
/// `uri-reference`, `uri-template`, `email`, or any custom tag the embedder
/// wants to support). Overwrites any previous registration for the same name.
pub fn register_format<F>(name: impl Into<String>, predicate: F)
where
    F: Fn(&str) -> bool + Send + Sync + 'static,
{
    REGISTRY.write().insert(name.into(), Arc::new(predicate));
}

pub(crate) fn host_predicate(name: &str) -> Option<FormatPredicate> {
    REGISTRY.read().get(name).cloned()
}

pub(crate) fn is_date(value: &str) -> bool {
    !value.contains('T') && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

pub(crate) fn is_date_time(value: &str) -> bool {
    if !value.contains('T') && !value.contains('t') {
        return false;
    }
    DateTime::parse_from_rfc3339(value).is_ok()
        || chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").is_ok()
}

pub(crate) fn is_time(value: &str) -> bool {
    TIME_RE.is_match(value)
}

pub(crate) fn is_ipv4(value: &str) -> bool {
    matches!(IpAddr::from_str(value), Ok(IpAddr::V4(_)))
}

pub(crate) fn is_ipv6(value: &str) -> bool {
    matches!(IpAddr::from_str(value), Ok(IpAddr::V6(_)))
}

pub(crate) fn is_hostname(value: &str) -> bool {
    if value.is_empty() || value.chars().count() > 255 {
        return false;
    }
    value
        .trim_end_matches('.')
        .split('.')
        .all(|label| label.chars().count() <= 63 && HOSTNAME_LABEL_RE.is_match(label))
}

pub(crate) fn is_json_pointer(value: &str) -> bool {
    JSON_POINTER_RE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_rejects_t_separator() {
        assert!(is_date("2022-07-01"));
        assert!(!is_date("2022-07-01T23:59:59"));
    }

    #[test]
    fn time_requires_hh_mm_ss() {
        assert!(is_time("23:59:59"));
        assert!(!is_time("xxx23:59:59xxx"));
        assert!(!is_time("2022-07-01"));
    }

    #[test]
    fn hostname_rejects_leading_hyphen_label() {
        assert!(is_hostname("example.com"));
        assert!(!is_hostname("-example.com"));
    }

    #[test]
    fn host_predicate_is_registrable() {
        register_format("even-digits", |s: &str| s.chars().all(|c| c.is_ascii_digit()));
        let pred = host_predicate("even-digits").unwrap();
        assert!(pred("1234"));
        assert!(!pred("12a4"));
        assert!(host_predicate("unregistered-format").is_none());
    }
}
