//! Dashboard shown once onboarding is complete.
//!
//! A [`DashboardSnapshot`] is assembled every time a user enters the
//! dashboard: numbers come from the injected [`WaitlistSource`] and a new
//! referral link is generated each time.

pub mod clipboard;
pub mod referral;
pub mod share;
pub mod source;

use std::sync::Arc;

use rand::Rng;
use serde::Serialize;

use crate::funnel::UserRecord;

pub use clipboard::{Clipboard, Notification, NotificationVariant, ReportedCopy, copy_referral_link};
pub use referral::ReferralLinkGenerator;
pub use share::twitter_share_url;
pub use source::{LeaderboardEntry, RandomSource, StaticSource, TwitterProfile, WaitlistSource};

/// Points awarded per referral.
pub const POINTS_PER_REFERRAL: u32 = 10;

/// Bonus points for a referral count.
pub fn bonus_points(referral_count: u32) -> u32 {
    referral_count.saturating_mul(POINTS_PER_REFERRAL)
}

/// Everything the dashboard view renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSnapshot {
    pub user: UserRecord,
    pub profile: TwitterProfile,
    pub position: u32,
    pub referral_count: u32,
    pub bonus_points: u32,
    pub referral_link: String,
    pub leaderboard: Vec<LeaderboardEntry>,
}

/// Builds dashboard snapshots from a data source and a link generator.
#[derive(Clone)]
pub struct Dashboard {
    source: Arc<dyn WaitlistSource>,
    links: ReferralLinkGenerator,
}

impl Dashboard {
    pub fn new(source: Arc<dyn WaitlistSource>, links: ReferralLinkGenerator) -> Self {
        Self { source, links }
    }

    /// Build a snapshot with a thread-local rng for the referral token.
    pub fn snapshot(&self, user: UserRecord) -> DashboardSnapshot {
        self.snapshot_with_rng(user, &mut rand::thread_rng())
    }

    pub fn snapshot_with_rng<R: Rng + ?Sized>(&self, user: UserRecord, rng: &mut R) -> DashboardSnapshot {
        let referral_count = self.source.referral_count();
        DashboardSnapshot {
            user,
            profile: self.source.profile(),
            position: self.source.position(),
            referral_count,
            bonus_points: bonus_points(referral_count),
            referral_link: self.links.generate(rng),
            leaderboard: self.source.leaderboard(),
        }
    }
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("base_url", &self.links.base_url())
            .finish_non_exhaustive()
    }
}
