// Copyright (c) 2025 Cloudflare, Inc.
// Licensed under the BSD-3-Clause license found in the LICENSE file or at https://opensource.org/licenses/BSD-3-Clause

//! Inbound request envelope.
//!
//! Every field is defaulted so that a sparse envelope still decodes. Fields the
//! authenticator depends on (timestamp, application id) are then rejected by
//! their own checks rather than by the JSON decoder.

use crate::ApiError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Type tag of a request sent when the user opens the skill.
pub const LAUNCH_REQUEST: &str = "LaunchRequest";
/// Type tag of a request carrying a recognized intent.
pub const INTENT_REQUEST: &str = "IntentRequest";
/// Type tag of a request sent when the platform closes the session.
pub const SESSION_ENDED_REQUEST: &str = "SessionEndedRequest";

/// A decoded skill request.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct RequestEnvelope {
    pub version: String,
    pub session: Session,
    pub request: RequestBody,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Session {
    pub new: bool,
    pub session_id: String,
    pub application: Application,
    pub attributes: HashMap<String, Value>,
    pub user: User,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Application {
    pub application_id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RequestBody {
    #[serde(rename = "type")]
    pub request_type: String,
    pub request_id: String,
    /// ISO 8601 UTC timestamp, e.g. `2015-05-13T12:34:56Z`.
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
    /// Why the session ended. Only set on `SessionEndedRequest`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Intent {
    pub name: String,
    pub slots: HashMap<String, Slot>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Slot {
    pub name: String,
    pub value: String,
}

impl RequestEnvelope {
    /// Decodes an envelope from raw JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a JSON object of the expected shape.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ApiError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session.session_id
    }

    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.session.user.user_id
    }

    #[must_use]
    pub fn application_id(&self) -> &str {
        &self.session.application.application_id
    }

    #[must_use]
    pub fn request_type(&self) -> &str {
        &self.request.request_type
    }

    /// Returns the intent name for an `IntentRequest`, and the request type
    /// tag for every other kind of request.
    #[must_use]
    pub fn intent_name(&self) -> &str {
        match (&self.request.intent, self.request_type()) {
            (Some(intent), INTENT_REQUEST) => &intent.name,
            _ => self.request_type(),
        }
    }

    /// Returns the value of the named slot. An unfilled slot yields an empty
    /// string.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::SlotNotFound`] if the intent has no such slot.
    pub fn slot_value(&self, name: &str) -> Result<&str, ApiError> {
        self.slots()
            .and_then(|slots| slots.get(name))
            .map(|slot| slot.value.as_str())
            .ok_or_else(|| ApiError::SlotNotFound(name.to_owned()))
    }

    #[must_use]
    pub fn slots(&self) -> Option<&HashMap<String, Slot>> {
        self.request.intent.as_ref().map(|intent| &intent.slots)
    }
}
