#![no_main]

use libfuzzer_sys::fuzz_target;
use pl_inference::{FitOptions, PowerLawFitter};

fuzz_target!(|data: &[u8]| {
    // Keep the quadratic candidate sweep bounded.
    let n = (data.len() / 8).min(1 << 10);
    let mut sample = Vec::with_capacity(n);
    for chunk in data.chunks_exact(8).take(n) {
        let mut b = [0u8; 8];
        b.copy_from_slice(chunk);
        sample.push(f64::from_le_bytes(b));
    }

    // Both sanitization policies: errors are fine, panics are not.
    let _ = PowerLawFitter::new().fit(&sample);
    let _ = PowerLawFitter::with_options(FitOptions {
        strip_nonpositive: true,
        ..FitOptions::default()
    })
    .fit(&sample);
});
