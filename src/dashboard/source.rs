//! Data sources behind the dashboard numbers.
//!
//! Nothing here is real: the funnel has no referral tracking. Sources are
//! injected so the HTTP surface can serve fixed or randomized values and
//! tests can pin them.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Upper bound (exclusive) for randomized referral counts.
pub const RANDOM_REFERRAL_CEILING: u32 = 15;

/// One row of the referral leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// 1-based, unique within one leaderboard.
    pub rank: u32,
    pub name: String,
    pub referrals: u32,
    pub avatar_url: String,
}

impl LeaderboardEntry {
    pub fn new(rank: u32, name: impl Into<String>, referrals: u32, avatar_url: impl Into<String>) -> Self {
        Self {
            rank,
            name: name.into(),
            referrals,
            avatar_url: avatar_url.into(),
        }
    }
}

/// Profile shown in the dashboard welcome card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwitterProfile {
    pub username: String,
    pub display_name: String,
    pub avatar_url: String,
}

impl Default for TwitterProfile {
    fn default() -> Self {
        Self {
            username: "johndoe".to_string(),
            display_name: "John Doe".to_string(),
            avatar_url: avatar("photo-1472099645785-5658abf4ff4e", 150),
        }
    }
}

fn avatar(photo: &str, size: u32) -> String {
    format!("https://images.unsplash.com/{photo}?w={size}&h={size}&fit=crop&crop=face")
}

/// The stock leaderboard shown to every visitor.
pub fn default_leaderboard() -> Vec<LeaderboardEntry> {
    vec![
        LeaderboardEntry::new(1, "CryptoWhale", 47, avatar("photo-1535713875002-d1d0cf377fde", 40)),
        LeaderboardEntry::new(2, "NFTMaster", 34, avatar("photo-1494790108755-2616b612b786", 40)),
        LeaderboardEntry::new(3, "DigitalArt", 28, avatar("photo-1507003211169-0a1dd7228f2d", 40)),
        LeaderboardEntry::new(4, "BlockchainBro", 23, avatar("photo-1500648767791-00dcc994a43e", 40)),
        LeaderboardEntry::new(5, "MetaCollector", 19, avatar("photo-1438761681033-6461ffad8d80", 40)),
    ]
}

/// Supplies the numbers a dashboard is built from.
pub trait WaitlistSource: Send + Sync {
    /// Position in the waitlist (1-based).
    fn position(&self) -> u32;

    /// Number of friends who joined through this user's link.
    fn referral_count(&self) -> u32;

    /// Leaderboard rows, ordered by rank.
    fn leaderboard(&self) -> Vec<LeaderboardEntry>;

    /// Profile for the welcome card.
    fn profile(&self) -> TwitterProfile;
}

/// Fixed values. The default matches the stock landing page.
#[derive(Debug, Clone)]
pub struct StaticSource {
    pub position: u32,
    pub referral_count: u32,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub profile: TwitterProfile,
}

impl Default for StaticSource {
    fn default() -> Self {
        Self {
            position: 1247,
            referral_count: 0,
            leaderboard: default_leaderboard(),
            profile: TwitterProfile::default(),
        }
    }
}

impl StaticSource {
    pub fn with_position(mut self, position: u32) -> Self {
        self.position = position;
        self
    }

    pub fn with_referral_count(mut self, count: u32) -> Self {
        self.referral_count = count;
        self
    }
}

impl WaitlistSource for StaticSource {
    fn position(&self) -> u32 {
        self.position
    }

    fn referral_count(&self) -> u32 {
        self.referral_count
    }

    fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        self.leaderboard.clone()
    }

    fn profile(&self) -> TwitterProfile {
        self.profile.clone()
    }
}

/// Draws a fresh referral count in `0..15` on every call; everything else
/// comes from the wrapped static source.
pub struct RandomSource {
    base: StaticSource,
    rng: Mutex<StdRng>,
}

impl RandomSource {
    pub fn new(base: StaticSource) -> Self {
        Self {
            base,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic variant for tests.
    pub fn seeded(base: StaticSource, seed: u64) -> Self {
        Self {
            base,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl WaitlistSource for RandomSource {
    fn position(&self) -> u32 {
        self.base.position
    }

    fn referral_count(&self) -> u32 {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(0..RANDOM_REFERRAL_CEILING)
    }

    fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        self.base.leaderboard()
    }

    fn profile(&self) -> TwitterProfile {
        self.base.profile()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_leaderboard_is_ranked() {
        let board = default_leaderboard();
        assert_eq!(board.len(), 5);
        for (i, entry) in board.iter().enumerate() {
            assert_eq!(entry.rank as usize, i + 1);
        }
        assert_eq!(board[0].name, "CryptoWhale");
        assert_eq!(board[0].referrals, 47);
        assert_eq!(board[4].name, "MetaCollector");
        assert_eq!(board[4].referrals, 19);
        assert!(board.windows(2).all(|w| w[0].referrals >= w[1].referrals));
    }

    #[test]
    fn static_source_is_deterministic() {
        let source = StaticSource::default().with_position(12).with_referral_count(3);
        assert_eq!(source.position(), 12);
        assert_eq!(source.referral_count(), 3);
        assert_eq!(source.referral_count(), 3);
        assert_eq!(source.leaderboard(), default_leaderboard());
        assert_eq!(source.profile().username, "johndoe");
    }

    #[test]
    fn random_source_stays_in_range() {
        let source = RandomSource::seeded(StaticSource::default(), 7);
        for _ in 0..200 {
            assert!(source.referral_count() < RANDOM_REFERRAL_CEILING);
        }
        assert_eq!(source.position(), 1247);
    }

    #[test]
    fn same_seed_same_counts() {
        let a = RandomSource::seeded(StaticSource::default(), 42);
        let b = RandomSource::seeded(StaticSource::default(), 42);
        let left: Vec<u32> = (0..10).map(|_| a.referral_count()).collect();
        let right: Vec<u32> = (0..10).map(|_| b.referral_count()).collect();
        assert_eq!(left, right);
    }
}
