use std::sync::Arc;

use tower_http::cors::CorsLayer;

use waitlist_funnel::config::FunnelConfig;
use waitlist_funnel::dashboard::{Dashboard, RandomSource, ReferralLinkGenerator, StaticSource, WaitlistSource};
use waitlist_funnel::error::Result;
use waitlist_funnel::funnel::SocialLinks;
use waitlist_funnel::routes::{FunnelRouteState, funnel_routes};
use waitlist_funnel::sessions::{self, SessionStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = FunnelConfig::from_env()?;

    eprintln!("📝 Waitlist funnel v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   API: http://0.0.0.0:{}/api/sessions", config.port);
    eprintln!("   Referral links: {}?ref=...", config.referral_base_url);
    eprintln!(
        "   Referral counts: {}",
        if config.random_referrals { "random" } else { "fixed" }
    );

    // ── Dashboard data ──────────────────────────────────────────────────
    let base = StaticSource::default().with_position(config.position);
    let source: Arc<dyn WaitlistSource> = if config.random_referrals {
        Arc::new(RandomSource::new(base))
    } else {
        Arc::new(base)
    };
    let dashboard = Dashboard::new(source, ReferralLinkGenerator::new(config.referral_base_url.clone()));

    // ── Sessions ────────────────────────────────────────────────────────
    let social = SocialLinks {
        twitter_url: config.twitter_url.clone(),
        discord_url: config.discord_url.clone(),
    };
    let store = SessionStore::new(dashboard, social, config.session_idle_timeout);
    let _expiry_handle = sessions::spawn_expiry_task(Arc::clone(&store), config.expiry_interval);

    // ── HTTP ────────────────────────────────────────────────────────────
    let app = funnel_routes(FunnelRouteState {
        sessions: store,
        waitlist_size: config.waitlist_size,
    })
    .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    tracing::info!(port = config.port, "Waitlist funnel server started");
    axum::serve(listener, app).await?;

    Ok(())
}
