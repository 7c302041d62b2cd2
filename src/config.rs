//! Configuration types.

use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

/// Default base for generated referral links.
pub const DEFAULT_REFERRAL_BASE_URL: &str = "https://neftit.com/waitlist";
/// Twitter profile opened by the follow button.
pub const DEFAULT_TWITTER_URL: &str = "https://twitter.com/neftit";
/// Discord invite opened by the join button.
pub const DEFAULT_DISCORD_URL: &str = "https://discord.gg/neftit";

/// Funnel service configuration.
#[derive(Debug, Clone)]
pub struct FunnelConfig {
    /// HTTP port the REST surface binds to.
    pub port: u16,
    /// Base URL that referral tokens are appended to.
    pub referral_base_url: String,
    /// External URL handed out when the user follows on Twitter.
    pub twitter_url: String,
    /// External URL handed out when the user joins Discord.
    pub discord_url: String,
    /// Waitlist position shown on the dashboard.
    pub position: u32,
    /// Number of people already on the list, shown on the landing view.
    pub waitlist_size: u32,
    /// Draw a random referral count per dashboard entry instead of the fixed one.
    pub random_referrals: bool,
    /// Sessions untouched for this long are pruned.
    pub session_idle_timeout: Duration,
    /// How often the expiry sweep runs.
    pub expiry_interval: Duration,
}

impl Default for FunnelConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            referral_base_url: DEFAULT_REFERRAL_BASE_URL.to_string(),
            twitter_url: DEFAULT_TWITTER_URL.to_string(),
            discord_url: DEFAULT_DISCORD_URL.to_string(),
            position: 1247,
            waitlist_size: 1247,
            random_referrals: false,
            session_idle_timeout: Duration::from_secs(1800), // 30 minutes
            expiry_interval: Duration::from_secs(60),
        }
    }
}

impl FunnelConfig {
    /// Build config from `WAITLIST_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. Unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let idle_secs = parse_or(&lookup, "WAITLIST_SESSION_IDLE_SECS", defaults.session_idle_timeout.as_secs())?;
        let expiry_secs = parse_or(&lookup, "WAITLIST_EXPIRY_INTERVAL_SECS", defaults.expiry_interval.as_secs())?;
        if expiry_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "WAITLIST_EXPIRY_INTERVAL_SECS".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            port: parse_or(&lookup, "WAITLIST_PORT", defaults.port)?,
            referral_base_url: lookup("WAITLIST_REFERRAL_BASE_URL")
                .unwrap_or(defaults.referral_base_url),
            twitter_url: lookup("WAITLIST_TWITTER_URL").unwrap_or(defaults.twitter_url),
            discord_url: lookup("WAITLIST_DISCORD_URL").unwrap_or(defaults.discord_url),
            position: parse_or(&lookup, "WAITLIST_POSITION", defaults.position)?,
            waitlist_size: parse_or(&lookup, "WAITLIST_SIZE", defaults.waitlist_size)?,
            random_referrals: parse_or(&lookup, "WAITLIST_RANDOM_REFERRALS", defaults.random_referrals)?,
            session_idle_timeout: Duration::from_secs(idle_secs),
            expiry_interval: Duration::from_secs(expiry_secs),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("{raw:?}: {e}"),
        }),
        None => Ok(default),
    }
}
