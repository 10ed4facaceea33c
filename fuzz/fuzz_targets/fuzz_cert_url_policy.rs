#![no_main]

use alexa_verify::{is_trusted_cert_url, VerifierConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let _ = is_trusted_cert_url(data, &VerifierConfig::default());
});
