// Copyright (c) 2025 Cloudflare, Inc.
// Licensed under the BSD-3-Clause license found in the LICENSE file or at https://opensource.org/licenses/BSD-3-Clause

//! Routing of authenticated requests to skill handlers.

use crate::{
    ApiError, RequestEnvelope, ResponseEnvelope, INTENT_REQUEST, LAUNCH_REQUEST,
    SESSION_ENDED_REQUEST,
};

/// Handlers for the three request kinds a custom skill receives. Each handler
/// fills in the response it is given; unimplemented handlers leave it as is.
pub trait Skill {
    fn on_launch(&self, _request: &RequestEnvelope, _response: &mut ResponseEnvelope) {}

    fn on_intent(&self, _request: &RequestEnvelope, _response: &mut ResponseEnvelope) {}

    fn on_session_ended(&self, _request: &RequestEnvelope, _response: &mut ResponseEnvelope) {}
}

/// Builds the reply to `request` by calling the handler that matches its type.
///
/// # Errors
///
/// Returns [`ApiError::InvalidRequestType`] for request types other than
/// launch, intent, and session-ended.
pub fn dispatch<S: Skill + ?Sized>(
    skill: &S,
    request: &RequestEnvelope,
) -> Result<ResponseEnvelope, ApiError> {
    let mut response = ResponseEnvelope::new();
    match request.request_type() {
        LAUNCH_REQUEST => skill.on_launch(request, &mut response),
        INTENT_REQUEST => skill.on_intent(request, &mut response),
        SESSION_ENDED_REQUEST => skill.on_session_ended(request, &mut response),
        other => return Err(ApiError::InvalidRequestType(other.to_owned())),
    }
    log::debug!(
        "dispatched {} for session {}",
        request.intent_name(),
        request.session_id()
    );
    Ok(response)
}
