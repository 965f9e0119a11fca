#![no_main]
use libfuzzer_sys::fuzz_target;

use gfshares::ShareComponents;

fuzz_target!(|share: ShareComponents| {
    if let Ok(encoded) = share.encode(16) {
        let decoded = ShareComponents::decode(&encoded, 16).unwrap();
        assert_eq!(decoded, share);
    }
});
