//! Account tier detection for authenticated runs.
//!
//! Gold and higher tiers get a bigger page-request budget, so the run probes
//! the profile endpoint once at startup. This is a soft capability check:
//! whatever goes wrong, the run simply proceeds at the anonymous rate.
use log::debug;
use reqwest::Client;

use crate::config::Credentials;
use crate::danbooru::models::ProfileData;

/// Base account tier, everything above it gets the elevated request budget.
const MEMBER_LEVEL: &str = "Member";

/// Checks whether the credentials belong to a Gold (or higher) account.
///
/// Returns `false` on any connection or decode failure, never an error.
pub async fn is_gold_account(client: &Client, base_url: &str, auth: &Credentials) -> bool {
    let url = format!("{}/profile.json", base_url);

    let response = client
        .get(url)
        .query(&[("login", &auth.login), ("api_key", &auth.api_key)])
        .send()
        .await;

    let profile = match response {
        Ok(res) => match res.json::<ProfileData>().await {
            Ok(profile) => profile,
            Err(e) => {
                debug!("Failed to decode profile response: {}", e);
                return false;
            }
        },
        Err(e) => {
            debug!("Profile lookup failed: {}", e);
            return false;
        }
    };

    match profile.level_string {
        Some(level) => {
            debug!("Account level: {}", level);
            level != MEMBER_LEVEL
        }
        None => false,
    }
}
