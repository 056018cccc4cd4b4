#![no_main]

use sortviz_core::{InputError, MAX_CUSTOM_LEN, parse_custom};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.len() > 4096 {
        return;
    }

    match parse_custom(text) {
        Ok(values) => {
            assert!(!values.is_empty());
            assert!(values.len() <= MAX_CUSTOM_LEN);
        }
        // Nothing but separators.
        Err(InputError::Empty) => assert!(
            text.chars().all(|c| c == ',' || c.is_whitespace()),
            "non-separator text rejected as empty: {text:?}"
        ),
        Err(InputError::NotANumber { token } | InputError::OutOfRange { token }) => {
            assert!(!token.is_empty());
            assert!(text.contains(token.as_str()));
        }
    }
});
