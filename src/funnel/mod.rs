//! Onboarding funnel: email check, completion state machine, view routing.
//!
//! A visitor fills in an email, follows on Twitter and joins Discord. Once
//! all three hold the form can be submitted, which produces a `UserRecord`
//! and switches the router to the dashboard.

pub mod model;
pub mod router;
pub mod state;
pub mod validator;

pub use model::UserRecord;
pub use router::{SocialLinks, View, ViewKind, ViewRouter};
pub use state::{EMAIL_ERROR_MESSAGE, OnboardingPhase, OnboardingState};
pub use validator::validate;
