//! Argument checks run before any request is sent

use std::sync::LazyLock;

use regex::Regex;

use crate::commands::CommandError;

static DNS_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").expect("DNS label pattern is valid")
});

static DNS_SUBDOMAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$")
        .expect("DNS subdomain pattern is valid")
});

const MAX_LABEL_LEN: usize = 63;
const MAX_SUBDOMAIN_LEN: usize = 253;

/// Namespaces are RFC 1123 labels
pub fn namespace(value: &str) -> Result<&str, CommandError> {
    if value.len() > MAX_LABEL_LEN {
        return Err(invalid_name("namespace", value, "must be at most 63 characters"));
    }
    if !DNS_LABEL.is_match(value) {
        return Err(invalid_name(
            "namespace",
            value,
            "must consist of lower case alphanumerics or '-', and start and end with an alphanumeric",
        ));
    }
    Ok(value)
}

/// Pod and deployment names are RFC 1123 subdomains
pub fn object_name<'a>(kind: &'static str, value: &'a str) -> Result<&'a str, CommandError> {
    if value.len() > MAX_SUBDOMAIN_LEN {
        return Err(invalid_name(kind, value, "must be at most 253 characters"));
    }
    if !DNS_SUBDOMAIN.is_match(value) {
        return Err(invalid_name(
            kind,
            value,
            "must consist of lower case alphanumerics, '-' or '.', and start and end with an alphanumeric",
        ));
    }
    Ok(value)
}

/// Parse a replica count, rejecting anything but a non-negative integer
pub fn replicas(value: &str) -> Result<i32, CommandError> {
    let parsed: i32 = value.parse().map_err(|e: std::num::ParseIntError| {
        CommandError::InvalidReplicas {
            value: value.to_string(),
            reason: e.to_string(),
        }
    })?;

    if parsed < 0 {
        return Err(CommandError::InvalidReplicas {
            value: value.to_string(),
            reason: "must not be negative".to_string(),
        });
    }

    Ok(parsed)
}

fn invalid_name(kind: &'static str, value: &str, reason: &'static str) -> CommandError {
    CommandError::InvalidName {
        kind,
        value: value.to_string(),
        reason,
    }
}
