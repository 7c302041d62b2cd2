//! Onboarding state machine: email plus two social confirmations.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::model::UserRecord;
use super::validator::validate;
use crate::error::FunnelError;

/// Inline message shown under the email field.
pub const EMAIL_ERROR_MESSAGE: &str = "Please enter a valid email address";

/// Where the landing form currently stands.
///
/// `Ready` is never stored: it is derived from the fields on every call to
/// [`OnboardingState::phase`]. Only `Submitted` is sticky.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingPhase {
    Editing,
    Ready,
    Submitted,
}

impl OnboardingPhase {
    /// Whether this phase is terminal (the record has been handed off).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Submitted)
    }
}

impl std::fmt::Display for OnboardingPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Editing => "editing",
            Self::Ready => "ready",
            Self::Submitted => "submitted",
        };
        write!(f, "{s}")
    }
}

/// Transient state of the landing form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OnboardingState {
    email: String,
    email_error: Option<String>,
    twitter_followed: bool,
    discord_joined: bool,
    submitted: bool,
}

impl OnboardingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn email_error(&self) -> Option<&str> {
        self.email_error.as_deref()
    }

    pub fn twitter_followed(&self) -> bool {
        self.twitter_followed
    }

    pub fn discord_joined(&self) -> bool {
        self.discord_joined
    }

    /// Store a new email value and refresh the inline error.
    ///
    /// An empty value clears the error; the form only complains once the
    /// user has typed something that does not look like an address.
    pub fn set_email(&mut self, email: impl Into<String>) {
        if self.submitted {
            debug!("Ignoring email change on submitted onboarding");
            return;
        }
        let email = email.into();
        self.email_error = if !email.is_empty() && !validate(&email) {
            Some(EMAIL_ERROR_MESSAGE.to_string())
        } else {
            None
        };
        self.email = email;
    }

    /// Flip the Twitter flag on. Returns true if it changed.
    pub fn mark_twitter_followed(&mut self) -> bool {
        if self.submitted || self.twitter_followed {
            return false;
        }
        self.twitter_followed = true;
        true
    }

    /// Flip the Discord flag on. Returns true if it changed.
    pub fn mark_discord_joined(&mut self) -> bool {
        if self.submitted || self.discord_joined {
            return false;
        }
        self.discord_joined = true;
        true
    }

    /// All three conditions hold. Recomputed on every call.
    pub fn is_ready(&self) -> bool {
        !self.email.is_empty() && validate(&self.email) && self.twitter_followed && self.discord_joined
    }

    pub fn phase(&self) -> OnboardingPhase {
        if self.submitted {
            OnboardingPhase::Submitted
        } else if self.is_ready() {
            OnboardingPhase::Ready
        } else {
            OnboardingPhase::Editing
        }
    }

    /// Try to finish onboarding.
    ///
    /// An empty or malformed email sets the inline error and fails with
    /// [`FunnelError::InvalidEmailFormat`]. A valid email with a missing
    /// social flag fails with [`FunnelError::NotReady`] and changes nothing.
    /// On success the state becomes `Submitted` and a [`UserRecord`] with the
    /// current field values is returned.
    pub fn attempt_complete(&mut self) -> Result<UserRecord, FunnelError> {
        if self.submitted {
            return Err(FunnelError::AlreadySubmitted);
        }
        if self.email.is_empty() || !validate(&self.email) {
            self.email_error = Some(EMAIL_ERROR_MESSAGE.to_string());
            return Err(FunnelError::InvalidEmailFormat);
        }
        if !(self.twitter_followed && self.discord_joined) {
            return Err(FunnelError::NotReady);
        }

        self.email_error = None;
        self.submitted = true;
        Ok(UserRecord::new(
            self.email.clone(),
            self.twitter_followed,
            self.discord_joined,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy)]
    enum EmailCase {
        Valid,
        Invalid,
        Empty,
    }

    fn state_for(email: EmailCase, twitter: bool, discord: bool) -> OnboardingState {
        let mut state = OnboardingState::new();
        state.set_email(match email {
            EmailCase::Valid => "user@example.com",
            EmailCase::Invalid => "a@b",
            EmailCase::Empty => "",
        });
        if twitter {
            state.mark_twitter_followed();
        }
        if discord {
            state.mark_discord_joined();
        }
        state
    }

    #[test]
    fn readiness_matrix() {
        let emails = [EmailCase::Valid, EmailCase::Invalid, EmailCase::Empty];
        let mut cases = 0;
        for email in emails {
            for twitter in [false, true] {
                for discord in [false, true] {
                    let state = state_for(email, twitter, discord);
                    let expected = matches!(email, EmailCase::Valid) && twitter && discord;
                    assert_eq!(
                        state.is_ready(),
                        expected,
                        "email={email:?} twitter={twitter} discord={discord}"
                    );
                    let phase = if expected { OnboardingPhase::Ready } else { OnboardingPhase::Editing };
                    assert_eq!(state.phase(), phase);
                    cases += 1;
                }
            }
        }
        assert_eq!(cases, 12);
    }

    #[test]
    fn set_email_toggles_error() {
        let mut state = OnboardingState::new();
        state.set_email("a@b");
        assert_eq!(state.email_error(), Some(EMAIL_ERROR_MESSAGE));

        state.set_email("a@b.com");
        assert_eq!(state.email_error(), None);
        assert_eq!(state.email(), "a@b.com");

        state.set_email("");
        assert_eq!(state.email_error(), None, "empty input should not show an error");
    }

    #[test]
    fn social_flags_are_one_way_and_idempotent() {
        let mut state = OnboardingState::new();
        assert!(state.mark_twitter_followed());
        assert!(!state.mark_twitter_followed());
        assert!(state.twitter_followed());

        assert!(state.mark_discord_joined());
        assert!(!state.mark_discord_joined());
        assert!(state.discord_joined());
    }

    #[test]
    fn complete_with_empty_email_sets_error() {
        let mut state = state_for(EmailCase::Empty, true, true);
        assert_eq!(state.email_error(), None);

        let err = state.attempt_complete().unwrap_err();
        assert_eq!(err, FunnelError::InvalidEmailFormat);
        assert_eq!(state.email_error(), Some(EMAIL_ERROR_MESSAGE));
        assert_eq!(state.phase(), OnboardingPhase::Editing);
        assert_eq!(err.to_string(), EMAIL_ERROR_MESSAGE);
    }

    #[test]
    fn complete_while_not_ready_has_no_effect() {
        for (twitter, discord) in [(false, false), (true, false), (false, true)] {
            let mut state = state_for(EmailCase::Valid, twitter, discord);
            let before = state.clone();

            assert_eq!(state.attempt_complete(), Err(FunnelError::NotReady));
            assert_eq!(state, before, "not-ready completion must not change state");
            assert!(!state.phase().is_terminal());
        }
    }

    #[test]
    fn complete_end_to_end() {
        let mut state = OnboardingState::new();
        state.set_email("user@example.com");
        state.mark_twitter_followed();
        state.mark_discord_joined();
        assert_eq!(state.phase(), OnboardingPhase::Ready);

        let record = state.attempt_complete().unwrap();
        assert_eq!(record.email(), "user@example.com");
        assert!(record.twitter_followed());
        assert!(record.discord_joined());
        assert_eq!(state.phase(), OnboardingPhase::Submitted);
    }

    #[test]
    fn submitted_is_terminal() {
        let mut state = state_for(EmailCase::Valid, true, true);
        state.attempt_complete().unwrap();

        assert_eq!(state.attempt_complete(), Err(FunnelError::AlreadySubmitted));
        state.set_email("other@example.com");
        assert_eq!(state.email(), "user@example.com");
    }

    #[test]
    fn display_matches_serde() {
        for phase in [OnboardingPhase::Editing, OnboardingPhase::Ready, OnboardingPhase::Submitted] {
            let json = serde_json::to_string(&phase).unwrap();
            assert_eq!(format!("\"{phase}\""), json);
        }
    }
}
