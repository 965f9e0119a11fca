#![no_main]
use libfuzzer_sys::fuzz_target;

use arbitrary::Arbitrary;
use gfshares::{Config, SecretSharing};

#[derive(Debug, Arbitrary)]
struct Parameters {
    pub config: Config,
    pub secret: Vec<u8>,
    pub num_shares: u8,
    pub threshold: u8,
    pub pad_length: u16,
}

fuzz_target!(|params: Parameters| {
    let Ok(sss) = SecretSharing::new(params.config) else {
        return;
    };
    let secret = hex::encode(&params.secret);
    let threshold = params.threshold as usize;
    let Ok(shares) = sss.share_padded(
        &secret,
        params.num_shares as usize,
        threshold,
        params.pad_length as usize,
    ) else {
        return;
    };

    assert_eq!(sss.combine(&shares[shares.len() - threshold..]).unwrap(), secret);
});
