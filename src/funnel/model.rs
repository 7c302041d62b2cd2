//! Records produced by the onboarding flow.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Snapshot of a finished onboarding.
///
/// Only built by [`OnboardingState::attempt_complete`](super::state::OnboardingState::attempt_complete),
/// which guarantees the email validated and both social flags were set.
/// Fields are read-only once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRecord {
    email: String,
    twitter_followed: bool,
    discord_joined: bool,
    completed_at: DateTime<Utc>,
}

impl UserRecord {
    pub(crate) fn new(email: impl Into<String>, twitter_followed: bool, discord_joined: bool) -> Self {
        Self {
            email: email.into(),
            twitter_followed,
            discord_joined,
            completed_at: Utc::now(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn twitter_followed(&self) -> bool {
        self.twitter_followed
    }

    pub fn discord_joined(&self) -> bool {
        self.discord_joined
    }

    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }
}
