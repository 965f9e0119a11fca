#![no_main]
use libfuzzer_sys::fuzz_target;

use arbitrary::Arbitrary;
use gfshares::{Config, SecretSharing};

#[derive(Debug, Arbitrary)]
struct Parameters {
    pub config: Config,
    pub shares: Vec<String>,
    pub at: u32,
}

fuzz_target!(|params: Parameters| {
    if let Ok(sss) = SecretSharing::new(params.config) {
        let _secret = sss.combine_at(&params.shares, params.at);
    }
});
