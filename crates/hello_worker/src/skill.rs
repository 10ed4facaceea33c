// Copyright (c) 2025 Cloudflare, Inc.
// Licensed under the BSD-3-Clause license found in the LICENSE file or at https://opensource.org/licenses/BSD-3-Clause

use alexa_api::{RequestEnvelope, ResponseEnvelope, Skill};

const ASK_INTENT: &str = "Ask";
const TOPIC_SLOT: &str = "topic";

/// Greets on launch and gives opinions on programming languages.
pub(crate) struct HelloSkill;

impl Skill for HelloSkill {
    fn on_launch(&self, _request: &RequestEnvelope, response: &mut ResponseEnvelope) {
        response.output_speech("Hello from a Rust skill");
    }

    fn on_intent(&self, request: &RequestEnvelope, response: &mut ResponseEnvelope) {
        if request.intent_name() != ASK_INTENT {
            response.output_speech("Unexpected request");
            return;
        }
        match request.slot_value(TOPIC_SLOT) {
            Err(e) => {
                log::warn!("{e}");
                response.output_speech("Internal error");
            }
            Ok("") => {
                response.output_speech("I'm not sure what you mean by that");
            }
            Ok(topic) if topic.eq_ignore_ascii_case("rust") => {
                response.output_speech("Good choice, that's all you need to know!");
            }
            Ok(topic) => {
                response.output_speech(format!("Don't use {topic}, use Rust!"));
            }
        }
    }
}
