#![no_main]

use libfuzzer_sys::fuzz_target;
use sigcatalog::signatures::{decode, encode};

fuzz_target!(|data: &[u8]| {
    let Some((&count, rest)) = data.split_first() else {
        return;
    };
    let tokens: Vec<u16> = rest
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();

    // Anything that decodes must encode back to exactly the same tokens
    if let Ok(records) = decode(&tokens, usize::from(count)) {
        assert_eq!(encode(&records).ok(), Some(tokens));
    }
});
