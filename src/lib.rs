//! Waitlist funnel — landing form, onboarding state machine and mocked
//! referral dashboard, served over a small REST API.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod funnel;
pub mod routes;
pub mod sessions;
