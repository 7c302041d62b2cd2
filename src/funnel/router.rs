//! View router: landing form or dashboard, never both.

use serde::Serialize;
use tracing::{debug, info};

use super::model::UserRecord;
use super::state::OnboardingState;
use crate::dashboard::{Dashboard, DashboardSnapshot};
use crate::error::FunnelError;

/// External pages handed to the client by the social buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialLinks {
    pub twitter_url: String,
    pub discord_url: String,
}

/// Which view is active, without its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    Landing,
    Dashboard,
}

impl std::fmt::Display for ViewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Landing => write!(f, "landing"),
            Self::Dashboard => write!(f, "dashboard"),
        }
    }
}

/// The active view and the state it owns.
#[derive(Debug, Clone)]
pub enum View {
    Landing(OnboardingState),
    Dashboard(Box<DashboardSnapshot>),
}

impl View {
    pub fn kind(&self) -> ViewKind {
        match self {
            Self::Landing(_) => ViewKind::Landing,
            Self::Dashboard(_) => ViewKind::Dashboard,
        }
    }
}

/// Root controller for one visitor.
///
/// Starts on the landing view. A completed onboarding moves it to the
/// dashboard; going back always starts a blank form.
#[derive(Debug, Clone)]
pub struct ViewRouter {
    view: View,
    dashboard: Dashboard,
    social: SocialLinks,
}

impl ViewRouter {
    pub fn new(dashboard: Dashboard, social: SocialLinks) -> Self {
        Self {
            view: View::Landing(OnboardingState::new()),
            dashboard,
            social,
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn kind(&self) -> ViewKind {
        self.view.kind()
    }

    fn landing_mut(&mut self, action: &str) -> Result<&mut OnboardingState, FunnelError> {
        match &mut self.view {
            View::Landing(state) => Ok(state),
            View::Dashboard(_) => Err(wrong_view(action, ViewKind::Dashboard)),
        }
    }

    /// The dashboard snapshot, if the dashboard is active.
    pub fn dashboard(&self, action: &str) -> Result<&DashboardSnapshot, FunnelError> {
        match &self.view {
            View::Dashboard(snapshot) => Ok(&**snapshot),
            View::Landing(_) => Err(wrong_view(action, ViewKind::Landing)),
        }
    }

    pub fn set_email(&mut self, email: impl Into<String>) -> Result<&OnboardingState, FunnelError> {
        let state = self.landing_mut("set_email")?;
        state.set_email(email);
        Ok(&*state)
    }

    /// Mark the Twitter follow and return the profile URL to open.
    ///
    /// The flag flips as soon as the link is handed out; nothing checks that
    /// the follow actually happened.
    pub fn follow_twitter(&mut self) -> Result<&str, FunnelError> {
        if self.landing_mut("follow_twitter")?.mark_twitter_followed() {
            debug!("Twitter follow marked");
        }
        Ok(self.social.twitter_url.as_str())
    }

    /// Mark the Discord join and return the invite URL to open.
    pub fn join_discord(&mut self) -> Result<&str, FunnelError> {
        if self.landing_mut("join_discord")?.mark_discord_joined() {
            debug!("Discord join marked");
        }
        Ok(self.social.discord_url.as_str())
    }

    /// Store a finished record and switch to the dashboard.
    ///
    /// Records only come from a successful [`OnboardingState::attempt_complete`],
    /// so this stays crate-internal and is reached through [`Self::submit`].
    pub(crate) fn complete(&mut self, record: UserRecord) -> Result<&DashboardSnapshot, FunnelError> {
        let snapshot = self.dashboard.snapshot(record);
        info!(position = snapshot.position, referrals = snapshot.referral_count, "Entering dashboard");
        self.view = View::Dashboard(Box::new(snapshot));
        self.dashboard("complete")
    }

    /// Run the landing form's completion and, on success, enter the dashboard.
    ///
    /// On error the router stays on the landing view.
    pub fn submit(&mut self) -> Result<&DashboardSnapshot, FunnelError> {
        let record = self.landing_mut("complete")?.attempt_complete()?;
        self.complete(record)
    }

    /// Leave the dashboard for a blank landing form. The previous record is
    /// no longer shown. Refused on the landing view so an unfinished form
    /// is never wiped.
    pub fn back(&mut self) -> Result<&OnboardingState, FunnelError> {
        if let View::Landing(_) = self.view {
            return Err(wrong_view("back", ViewKind::Landing));
        }
        self.view = View::Landing(OnboardingState::new());
        debug!("Back to landing");
        self.landing_mut("back").map(|state| &*state)
    }
}

fn wrong_view(action: &str, view: ViewKind) -> FunnelError {
    FunnelError::WrongView {
        action: action.to_string(),
        view: view.to_string(),
    }
}
