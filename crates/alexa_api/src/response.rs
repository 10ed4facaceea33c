// Copyright (c) 2025 Cloudflare, Inc.
// Licensed under the BSD-3-Clause license found in the LICENSE file or at https://opensource.org/licenses/BSD-3-Clause

//! Outbound response envelope and its builder methods.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

pub const RESPONSE_VERSION: &str = "1.0";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub session_attributes: HashMap<String, Value>,
    pub response: ResponseBody,
    pub version: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    pub should_end_session: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum OutputSpeech {
    PlainText { text: String },
    #[serde(rename = "SSML")]
    Ssml { ssml: String },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum Card {
    Simple {
        title: String,
        content: String,
    },
    Standard {
        title: String,
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image: Option<CardImage>,
    },
    LinkAccount,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardImage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large_image_url: Option<String>,
}

impl Default for ResponseEnvelope {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseEnvelope {
    /// Returns an empty response that ends the session.
    #[must_use]
    pub fn new() -> Self {
        Self {
            session_attributes: HashMap::new(),
            response: ResponseBody {
                should_end_session: true,
                ..Default::default()
            },
            version: RESPONSE_VERSION.to_owned(),
        }
    }

    pub fn output_speech(&mut self, text: impl Into<String>) -> &mut Self {
        self.response.output_speech = Some(OutputSpeech::PlainText { text: text.into() });
        self
    }

    pub fn output_speech_ssml(&mut self, ssml: impl Into<String>) -> &mut Self {
        self.response.output_speech = Some(OutputSpeech::Ssml { ssml: ssml.into() });
        self
    }

    /// Shorthand for [`ResponseEnvelope::simple_card`].
    pub fn card(&mut self, title: impl Into<String>, content: impl Into<String>) -> &mut Self {
        self.simple_card(title, content)
    }

    pub fn simple_card(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> &mut Self {
        self.response.card = Some(Card::Simple {
            title: title.into(),
            content: content.into(),
        });
        self
    }

    /// Sets a card with an optional image. Empty image URLs are left out.
    pub fn standard_card(
        &mut self,
        title: impl Into<String>,
        text: impl Into<String>,
        small_image_url: &str,
        large_image_url: &str,
    ) -> &mut Self {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_owned());
        let image = CardImage {
            small_image_url: non_empty(small_image_url),
            large_image_url: non_empty(large_image_url),
        };
        self.response.card = Some(Card::Standard {
            title: title.into(),
            text: text.into(),
            image: (image != CardImage::default()).then_some(image),
        });
        self
    }

    /// Asks the user to link their account in the companion app.
    pub fn link_account_card(&mut self) -> &mut Self {
        self.response.card = Some(Card::LinkAccount);
        self
    }

    pub fn reprompt(&mut self, text: impl Into<String>) -> &mut Self {
        self.response.reprompt = Some(Reprompt {
            output_speech: OutputSpeech::PlainText { text: text.into() },
        });
        self
    }

    pub fn reprompt_ssml(&mut self, ssml: impl Into<String>) -> &mut Self {
        self.response.reprompt = Some(Reprompt {
            output_speech: OutputSpeech::Ssml { ssml: ssml.into() },
        });
        self
    }

    pub fn end_session(&mut self, flag: bool) -> &mut Self {
        self.response.should_end_session = flag;
        self
    }

    pub fn set_session_attribute(&mut self, key: impl Into<String>, value: Value) -> &mut Self {
        self.session_attributes.insert(key.into(), value);
        self
    }
}
