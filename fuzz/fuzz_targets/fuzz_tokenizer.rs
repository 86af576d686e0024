#![no_main]

use libfuzzer_sys::fuzz_target;
use pokedex_search::utils::{extract_shingles, extract_tokens, normalize_key, tokenize_query};

fuzz_target!(|text: &str| {
    let tokens = extract_tokens(text);
    assert!(tokens.windows(2).all(|w| w[0] < w[1]));

    for token in &tokens {
        let shingles = extract_shingles(token);
        assert!(shingles.windows(2).all(|w| w[0] < w[1]));
    }

    let key = normalize_key(text);
    assert!(!key.starts_with(' ') && !key.ends_with(' '));
    let _ = tokenize_query(text);
});
