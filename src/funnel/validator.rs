//! Email shape check used by the landing form.

use std::sync::LazyLock;

use regex::Regex;

/// Something, an `@`, something, a `.`, something. No whitespace, no extra `@`.
static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Returns true if `email` has the basic `local@domain.tld` shape.
///
/// The input is checked as given: no trimming, no case folding.
pub fn validate(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        for email in ["a@b.c", "a@b.com", "user@example.com", "first.last+tag@sub.example.co.uk"] {
            assert!(validate(email), "{email} should validate");
        }
    }

    #[test]
    fn rejects_missing_at_or_dot() {
        for email in ["", "plainaddress", "a.b.c", "a@b", "a@bcom", "@b.com", "a@.com", "a@b."] {
            assert!(!validate(email), "{email:?} should not validate");
        }
    }

    #[test]
    fn rejects_whitespace_and_double_at() {
        for email in [" a@b.com", "a@b.com ", "a b@c.com", "a@b c.com", "a@@b.com", "a@b@c.com"] {
            assert!(!validate(email), "{email:?} should not validate");
        }
    }

    #[test]
    fn dot_only_required_after_the_at() {
        // A dot before the @ does not count.
        assert!(!validate("a.b@c"));
        assert!(validate("a@b.c.d"));
    }

    #[test]
    fn generated_well_formed_addresses_validate() {
        let parts = ["x", "abc", "a-b", "A1", "__", "ñ"];
        for a in parts {
            for b in parts {
                for c in parts {
                    let email = format!("{a}@{b}.{c}");
                    assert!(validate(&email), "{email} should validate");
                }
            }
        }
    }

    #[test]
    fn strings_without_at_never_validate() {
        for s in ["abc", "a.b", "x.y.z", "hello world.com", "..."] {
            assert!(!validate(s));
        }
    }
}
