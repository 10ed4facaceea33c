#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

use alexa_verify::{RequestAuthenticator, VerifierConfig};
use serde::Deserialize;
use std::sync::LazyLock;

mod fetcher;
mod frontend_worker;
mod skill;
mod util;

use fetcher::WorkerFetcher;

/// Environment variable holding the skill's application id.
const APP_ID_VAR: &str = "ALEXA_APP_ID";

#[derive(Deserialize, Debug)]
struct AppConfig {
    logging_level: Option<String>,
    #[serde(default)]
    verifier: VerifierConfig,
}

// Application configuration.
static CONFIG: LazyLock<AppConfig> = LazyLock::new(|| {
    serde_json::from_str::<AppConfig>(include_str!("../config.json"))
        .expect("Failed to parse config")
});

static AUTHENTICATOR: LazyLock<RequestAuthenticator<WorkerFetcher>> =
    LazyLock::new(|| RequestAuthenticator::new(CONFIG.verifier.clone(), WorkerFetcher));
