#![no_main]

use alexa_api::{dispatch, RequestEnvelope, Skill};
use libfuzzer_sys::fuzz_target;

struct Noop;

impl Skill for Noop {}

fuzz_target!(|data: &[u8]| {
    if let Ok(request) = RequestEnvelope::from_slice(data) {
        let _ = request.intent_name();
        let _ = dispatch(&Noop, &request);
    }
});
