// Copyright (c) 2025 Cloudflare, Inc.
// Licensed under the BSD-3-Clause license found in the LICENSE file or at https://opensource.org/licenses/BSD-3-Clause

//! Entrypoint for the skill endpoint.

use crate::{skill::HelloSkill, util, APP_ID_VAR, AUTHENTICATOR, CONFIG};
use alexa_verify::{RawBody, SignatureHeaders};
use log::{debug, warn};
#[allow(clippy::wildcard_imports)]
use worker::*;

#[event(start)]
fn start() {
    util::init_logging(CONFIG.logging_level.as_deref());
    console_error_panic_hook::set_once();
}

/// Worker entrypoint.
///
/// # Errors
///
/// Returns an error if the request body cannot be read or the response cannot
/// be serialized.
#[event(fetch, respond_with_errors)]
async fn main(mut req: Request, env: Env, _ctx: Context) -> Result<Response> {
    if req.method() != Method::Post {
        return Response::error("Method not allowed", 405);
    }

    let headers = SignatureHeaders::from_pairs(req.headers().entries());
    let body = RawBody::from(req.bytes().await?);
    let expected_app_id = env
        .var(APP_ID_VAR)
        .map(|v| v.to_string())
        .unwrap_or_default();
    let now_secs = Date::now().as_millis() / 1000;

    let envelope = match AUTHENTICATOR
        .authenticate(&headers, &body, &expected_app_id, now_secs)
        .await
    {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!("Bad request: {e}");
            return Response::error(format!("Bad request: {e}"), 400);
        }
    };

    match alexa_api::dispatch(&HelloSkill, &envelope) {
        Ok(response) => {
            debug!("answering {}", envelope.request.request_id);
            Response::from_json(&response)
        }
        Err(e) => {
            warn!("Bad request: {e}");
            Response::error(format!("Bad request: {e}"), 400)
        }
    }
}
