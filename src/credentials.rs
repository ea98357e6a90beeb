//! Provider credential gate.
//!
//! Each cloud has a fixed list of environment variables that must be
//! present (and non-empty) before its scanners run. Values are never
//! parsed or validated here; the scanners read them from their own
//! environment.

use crate::cli::Cloud;
use serde::Serialize;
use std::env;

/// Required environment variables per cloud.
///
/// Optional variables (AWS session token and region, Azure subscription
/// id) are deliberately not gated.
pub fn required_vars(cloud: Cloud) -> &'static [&'static str] {
    match cloud {
        Cloud::Aws => &["AWS_ACCESS_KEY_ID", "AWS_SECRET_ACCESS_KEY"],
        Cloud::Azure => &["AZURE_CLIENT_ID", "AZURE_CLIENT_SECRET", "AZURE_TENANT_ID"],
        Cloud::Gcp => &["GOOGLE_APPLICATION_CREDENTIALS"],
    }
}

/// Gate verdict for one cloud.
#[derive(Debug, Clone, Serialize)]
pub struct CredentialStatus {
    pub cloud: Cloud,
    pub missing: Vec<&'static str>,
}

impl CredentialStatus {
    pub fn is_satisfied(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Check the process environment for the cloud's required variables.
pub fn check(cloud: Cloud) -> CredentialStatus {
    check_with(cloud, |name| env::var(name).ok())
}

fn check_with(cloud: Cloud, lookup: impl Fn(&str) -> Option<String>) -> CredentialStatus {
    let missing = required_vars(cloud)
        .iter()
        .copied()
        .filter(|name| match lookup(name) {
            Some(value) => value.trim().is_empty(),
            None => true,
        })
        .collect();
    CredentialStatus { cloud, missing }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_present() {
        let status = check_with(Cloud::Aws, |_| Some("value".to_string()));
        assert!(status.is_satisfied());
        assert!(status.missing.is_empty());
    }

    #[test]
    fn test_unset_vars_reported() {
        let status = check_with(Cloud::Azure, |_| None);
        assert!(!status.is_satisfied());
        assert_eq!(
            status.missing,
            vec!["AZURE_CLIENT_ID", "AZURE_CLIENT_SECRET", "AZURE_TENANT_ID"]
        );
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let status = check_with(Cloud::Gcp, |_| Some("   ".to_string()));
        assert_eq!(status.missing, vec!["GOOGLE_APPLICATION_CREDENTIALS"]);
    }

    #[test]
    fn test_partial_credentials() {
        let status = check_with(Cloud::Aws, |name| {
            (name == "AWS_ACCESS_KEY_ID").then(|| "AKIA...".to_string())
        });
        assert_eq!(status.missing, vec!["AWS_SECRET_ACCESS_KEY"]);
    }

    #[test]
    fn test_required_lists_are_fixed() {
        assert_eq!(required_vars(Cloud::Aws).len(), 2);
        assert_eq!(required_vars(Cloud::Azure).len(), 3);
        assert_eq!(required_vars(Cloud::Gcp), &["GOOGLE_APPLICATION_CREDENTIALS"]);
    }
}
