// Copyright (c) 2025 Cloudflare, Inc.
// Licensed under the BSD-3-Clause license found in the LICENSE file or at https://opensource.org/licenses/BSD-3-Clause

//! Wire types for the Alexa custom skill interface.
//!
//! - [`RequestEnvelope`] is the JSON body the platform POSTs to a skill.
//! - [`ResponseEnvelope`] is what the skill answers with.
//! - [`Skill`] and [`dispatch`] route a request to the matching handler.
//!
//! Nothing in this crate authenticates a request. Callers are expected to run
//! the envelope through `alexa_verify` first.

pub mod request;
pub mod response;
pub mod skill;

pub use request::*;
pub use response::*;
pub use skill::*;

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("invalid request type: {0}")]
    InvalidRequestType(String),
    #[error("slot not found: {0}")]
    SlotNotFound(String),
}
