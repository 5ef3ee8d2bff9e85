//! Denylist key construction and the delimited value codec.
//!
//! Delimited layout: one string per list, members joined by `;`.

use tollgate_core::traits::Denylist;
use tollgate_core::traits::revocation::DENYLIST_DELIMITER;

/// Full store key of a denylist under the configured prefix.
pub fn list_key(prefix: &str, list: Denylist) -> String {
    format!("{prefix}{}", list.key())
}

/// Iterate the members of a delimited list value.
pub fn members(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(DENYLIST_DELIMITER)
        .filter(|member| !member.is_empty())
}

/// Membership test on a delimited list value.
pub fn contains_member(value: &str, token: &str) -> bool {
    members(value).any(|member| member == token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_key_prefix() {
        assert_eq!(
            list_key("tollgate:", Denylist::Access),
            "tollgate:expired_access_tokens"
        );
        assert_eq!(list_key("", Denylist::Refresh), "expired_refresh_tokens");
    }

    #[test]
    fn test_membership_is_exact() {
        let value = "aaa.bbb.ccc;ddd.eee.fff";
        assert!(contains_member(value, "ddd.eee.fff"));
        assert!(!contains_member(value, "aaa.bbb"));
        assert!(!contains_member(value, ""));
    }

    #[test]
    fn test_empty_segments_skipped() {
        let found: Vec<_> = members(";a.b.c;;d.e.f;").collect();
        assert_eq!(found, vec!["a.b.c", "d.e.f"]);
    }
}
