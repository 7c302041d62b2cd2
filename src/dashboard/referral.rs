//! Shareable referral links.
//!
//! Tokens are cosmetic: they are not stored, not checked for collisions and
//! do not resolve to anything.

use rand::Rng;

/// Length of the `ref` token.
pub const TOKEN_LEN: usize = 9;

const TOKEN_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Builds `<base-url>?ref=<token>` links.
#[derive(Debug, Clone)]
pub struct ReferralLinkGenerator {
    base_url: String,
}

impl ReferralLinkGenerator {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Generate a fresh link using the supplied rng.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        format!("{}?ref={}", self.base_url, generate_token(rng))
    }
}

/// Random lowercase alphanumeric token of [`TOKEN_LEN`] characters.
pub fn generate_token<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..TOKEN_LEN)
        .map(|_| TOKEN_ALPHABET[rng.gen_range(0..TOKEN_ALPHABET.len())] as char)
        .collect()
}
