//! Partial masking of email addresses.

/// Character substituted for hidden characters.
pub const MASK_CHAR: char = '*';

/// Splits an address into `(local, domain)` when it has exactly one `@`.
fn split_address(address: &str) -> Option<(&str, &str)> {
    let mut parts = address.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => Some((local, domain)),
        _ => None,
    }
}

fn mask(count: usize) -> String {
    std::iter::repeat_n(MASK_CHAR, count).collect()
}

/// Masks an email address for logging, keeping the first two and the last
/// character of the local part.
///
/// Local parts of two characters or fewer are masked entirely. Input
/// without exactly one `@` is returned unchanged.
///
/// # Example
///
/// ```
/// use vigil_core::mask_email;
///
/// assert_eq!(mask_email("johndoe@example.com"), "jo****e@example.com");
/// assert_eq!(mask_email("jo@example.com"), "**@example.com");
/// assert_eq!(mask_email("not-an-address"), "not-an-address");
/// ```
pub fn mask_email(address: &str) -> String {
    let Some((local, domain)) = split_address(address) else {
        return address.to_string();
    };

    let len = local.chars().count();
    if len <= 2 {
        return format!("{}@{}", mask(len), domain);
    }

    let head: String = local.chars().take(2).collect();
    let tail: String = local.chars().skip(len - 1).collect();
    format!("{}{}{}@{}", head, mask(len - 3), tail, domain)
}

/// Masks everything after the first two characters of the local part.
///
/// Used by key-based redaction, where the tail of the local part is hidden
/// as well. Returns `None` when the value is not a single-`@` address.
pub(crate) fn mask_email_local(address: &str) -> Option<String> {
    let (local, domain) = split_address(address)?;

    let len = local.chars().count();
    if len <= 2 {
        return Some(format!("{}@{}", mask(len), domain));
    }

    let head: String = local.chars().take(2).collect();
    Some(format!("{}{}@{}", head, mask(len - 2), domain))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_middle_of_long_local_part() {
        assert_eq!(mask_email("johndoe@example.com"), "jo****e@example.com");
        assert_eq!(mask_email("alice@corp.io"), "al**e@corp.io");
    }

    #[test]
    fn three_character_local_part_keeps_all_visible() {
        assert_eq!(mask_email("bob@example.com"), "bob@example.com");
    }

    #[test]
    fn short_local_part_is_fully_masked() {
        assert_eq!(mask_email("jo@example.com"), "**@example.com");
        assert_eq!(mask_email("j@example.com"), "*@example.com");
        assert_eq!(mask_email("@example.com"), "@example.com");
    }

    #[test]
    fn non_addresses_are_unchanged() {
        assert_eq!(mask_email("plain"), "plain");
        assert_eq!(mask_email("a@b@c"), "a@b@c");
        assert_eq!(mask_email(""), "");
    }

    #[test]
    fn multibyte_local_part_is_masked_per_character() {
        assert_eq!(mask_email("jösé@example.com"), "jö*é@example.com");
    }

    #[test]
    fn local_masking_hides_tail() {
        assert_eq!(
            mask_email_local("johndoe@example.com").as_deref(),
            Some("jo*****@example.com")
        );
        assert_eq!(mask_email_local("ab@x.com").as_deref(), Some("**@x.com"));
        assert_eq!(mask_email_local("no-at-sign"), None);
    }

    #[test]
    fn local_masking_is_idempotent() {
        let once = mask_email_local("johndoe@example.com").unwrap();
        let twice = mask_email_local(&once).unwrap();
        assert_eq!(once, twice);
    }
}
