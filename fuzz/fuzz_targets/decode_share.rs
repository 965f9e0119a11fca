#![no_main]
use libfuzzer_sys::fuzz_target;

use gfshares::ShareComponents;

fuzz_target!(|data: &str| {
    if let Ok(share) = ShareComponents::decode(data, 16) {
        assert_eq!(share.encode(16).unwrap().to_lowercase(), data.to_lowercase());
    }
});
