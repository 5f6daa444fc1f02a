#![no_main]
use libfuzzer_sys::fuzz_target;

use calcex::{eval_postfix, evaluate, parse_postfix, parse_tree, tokenize};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(tokens) = tokenize(s) {
            let _ = parse_tree(&tokens).and_then(|tree| evaluate(&tree));
            let _ = parse_postfix(&tokens).and_then(|postfix| eval_postfix(&postfix));
        }
    }
});
