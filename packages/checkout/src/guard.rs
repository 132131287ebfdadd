//! # Checkout Guard
//!
//! Decides what happens once the lead-capture form is submitted.
//!
//! ```text
//! ""  or "#"                    → ThankYou { name }           (no redirect)
//! http / https / mailto / tel   → Redirect(url + lead fields) (navigate)
//! anything else, or unparseable → CheckoutError               (nothing opens)
//! ```
//!
//! A rejected target is never navigated to, in this tab or any other.
//! Only a completed checkout reports a `lead` event.

use minisite_document::CheckoutProfile;
use minisite_renderer::AnalyticsSink;
use serde_json::json;
use thiserror::Error;
use tracing::{info, warn};
use url::Url;

pub const ALLOWED_SCHEMES: [&str; 4] = ["http", "https", "mailto", "tel"];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("checkout redirect is not a valid absolute URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("checkout redirect scheme `{scheme}` is not allowed")]
    DisallowedScheme { scheme: String },
}

/// Where a completed checkout leads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// No merchant target: acknowledge locally
    ThankYou { name: String },
    /// Merchant target with the lead fields appended
    Redirect(Url),
}

impl CheckoutOutcome {
    /// Acknowledgment text for [`CheckoutOutcome::ThankYou`]
    pub fn message(&self) -> Option<String> {
        match self {
            CheckoutOutcome::ThankYou { name } => {
                Some(format!("Thank you {}! Your registration was received.", name))
            }
            CheckoutOutcome::Redirect(_) => None,
        }
    }
}

/// Resolve the outcome without side effects
pub fn checkout_target(
    target: &str,
    profile: &CheckoutProfile,
) -> Result<CheckoutOutcome, CheckoutError> {
    let target = target.trim();
    if target.is_empty() || target == "#" {
        return Ok(CheckoutOutcome::ThankYou {
            name: profile.full_name.clone(),
        });
    }

    let mut url = Url::parse(target)?;
    if !ALLOWED_SCHEMES.contains(&url.scheme()) {
        return Err(CheckoutError::DisallowedScheme {
            scheme: url.scheme().to_string(),
        });
    }

    {
        let mut query = url.query_pairs_mut();
        for (key, value) in profile.fields() {
            if !value.is_empty() {
                query.append_pair(key, value);
            }
        }
    }

    Ok(CheckoutOutcome::Redirect(url))
}

/// The page's navigation surface
pub trait Navigator {
    /// Replace the current page
    fn navigate(&mut self, url: &Url);

    /// Show the local thank-you acknowledgment
    fn acknowledge(&mut self, message: &str);

    /// Tell the visitor the checkout could not continue
    fn reject(&mut self, error: &CheckoutError);
}

pub const LEAD_EVENT: &str = "lead";

/// Resolve the outcome, report the lead to `sink` and act on it through `navigator`
pub fn complete_checkout<N: Navigator, S: AnalyticsSink>(
    target: &str,
    profile: &CheckoutProfile,
    navigator: &mut N,
    sink: &mut S,
) -> Result<CheckoutOutcome, CheckoutError> {
    match checkout_target(target, profile) {
        Ok(outcome) => {
            let kind = match &outcome {
                CheckoutOutcome::Redirect(_) => "redirect",
                CheckoutOutcome::ThankYou { .. } => "thank_you",
            };
            sink.track(LEAD_EVENT, json!({ "outcome": kind }));
            match &outcome {
                CheckoutOutcome::Redirect(url) => {
                    info!(host = url.host_str().unwrap_or_default(), scheme = url.scheme(), "checkout redirect");
                    navigator.navigate(url);
                }
                CheckoutOutcome::ThankYou { .. } => {
                    if let Some(message) = outcome.message() {
                        navigator.acknowledge(&message);
                    }
                }
            }
            Ok(outcome)
        }
        Err(error) => {
            warn!(%error, "blocked checkout redirect");
            navigator.reject(&error);
            Err(error)
        }
    }
}
