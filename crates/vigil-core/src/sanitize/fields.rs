//! The set of key fragments that mark a value as sensitive.

use std::sync::Arc;

/// Key fragments that are always treated as sensitive.
pub const DEFAULT_SENSITIVE_FIELDS: &[&str] = &[
    "password",
    "token",
    "secret",
    "api_key",
    "apikey",
    "access_token",
    "refresh_token",
    "authorization",
    "credit_card",
    "ssn",
    "tax_id",
];

/// Immutable set of case-insensitive substrings.
///
/// A key is sensitive when its lowercase form contains any member, so
/// `"user_password_hint"` matches `"password"`. Cloning is cheap; the
/// members are shared.
///
/// # Example
///
/// ```
/// use vigil_core::SensitiveFieldSet;
///
/// let fields = SensitiveFieldSet::default();
/// assert!(fields.matches("X-Api-Key"));
/// assert!(fields.matches("user_password_hint"));
/// assert!(!fields.matches("username"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensitiveFieldSet {
    fields: Arc<[String]>,
}

impl SensitiveFieldSet {
    /// Builds a set from the given fragments. Fragments are lowercased and
    /// empty entries are ignored.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for field in fields {
            let field = field.as_ref().trim().to_lowercase();
            if !field.is_empty() && !normalized.contains(&field) {
                normalized.push(field);
            }
        }
        Self {
            fields: normalized.into(),
        }
    }

    /// Builds the default set extended with additional fragments.
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extra: Vec<String> = extra.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::new(
            DEFAULT_SENSITIVE_FIELDS
                .iter()
                .map(|s| s.to_string())
                .chain(extra),
        )
    }

    /// Returns true if the key contains any sensitive fragment.
    pub fn matches(&self, key: &str) -> bool {
        let key = key.to_lowercase();
        self.fields.iter().any(|field| key.contains(field.as_str()))
    }

    /// Returns the normalized members.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Returns the number of members.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the set has no members.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Default for SensitiveFieldSet {
    fn default() -> Self {
        Self::new(DEFAULT_SENSITIVE_FIELDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_contains_all_builtin_fields() {
        let set = SensitiveFieldSet::default();
        assert_eq!(set.len(), DEFAULT_SENSITIVE_FIELDS.len());
        for field in DEFAULT_SENSITIVE_FIELDS {
            assert!(set.matches(field), "{} should match", field);
        }
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        let set = SensitiveFieldSet::default();
        assert!(set.matches("PASSWORD"));
        assert!(set.matches("userPassword"));
        assert!(set.matches("Authorization"));
        assert!(set.matches("customer_ssn_last4"));
        assert!(!set.matches("name"));
        assert!(!set.matches("email"));
    }

    #[test]
    fn new_normalizes_and_deduplicates() {
        let set = SensitiveFieldSet::new(["PIN", "pin", "  ", "Cvv "]);
        assert_eq!(set.fields(), &["pin".to_string(), "cvv".to_string()]);
    }

    #[test]
    fn with_extra_extends_defaults() {
        let set = SensitiveFieldSet::with_extra(["session_id"]);
        assert!(set.matches("session_id"));
        assert!(set.matches("password"));
        assert_eq!(set.len(), DEFAULT_SENSITIVE_FIELDS.len() + 1);
    }

    #[test]
    fn empty_set_matches_nothing() {
        let set = SensitiveFieldSet::new(Vec::<String>::new());
        assert!(set.is_empty());
        assert!(!set.matches("password"));
    }
}
