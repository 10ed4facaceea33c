#![no_main]

use alexa_verify::SigningCertificate;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok((cert, _)) = SigningCertificate::from_pem_chain(data) {
        let _ = cert.check_validity(0);
        let _ = cert.check_name("echo-api.amazon.com");
        let _ = cert.rsa_public_key();
    }
});
