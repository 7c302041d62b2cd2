//! Share-on-Twitter intent URLs.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

const TWEET_INTENT: &str = "https://twitter.com/intent/tweet";

/// Characters left as-is by browser `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Text posted along with the referral link.
pub fn share_text(referral_link: &str) -> String {
    format!(
        "Just joined the NEFTIT waitlist! 🚀 Join me and get early access to the future of NFTs! {referral_link}"
    )
}

/// Intent URL that opens a prefilled tweet containing the referral link.
pub fn twitter_share_url(referral_link: &str) -> String {
    let text = share_text(referral_link);
    format!("{TWEET_INTENT}?text={}", utf8_percent_encode(&text, COMPONENT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use percent_encoding::percent_decode_str;

    #[test]
    fn intent_url_carries_encoded_link() {
        let link = "https://neftit.com/waitlist?ref=abc123xyz";
        let share = twitter_share_url(link);
        let encoded = share.strip_prefix("https://twitter.com/intent/tweet?text=").unwrap();
        // The raw link must be encoded, not spliced in.
        assert!(!encoded.contains("?ref=abc123xyz"));

        let text = percent_decode_str(encoded).decode_utf8().unwrap();
        assert!(text.ends_with(link));
        assert!(text.starts_with("Just joined the NEFTIT waitlist!"));
    }

    #[test]
    fn spaces_and_link_are_component_encoded() {
        let share = twitter_share_url("https://neftit.com/waitlist?ref=abc123xyz");
        assert!(share.starts_with("https://twitter.com/intent/tweet?text=Just%20joined%20the%20NEFTIT%20waitlist!%20"));
        assert!(!share.contains('+'));
        assert!(share.ends_with("https%3A%2F%2Fneftit.com%2Fwaitlist%3Fref%3Dabc123xyz"));
        assert!(share.contains("%F0%9F%9A%80"));
    }
}
