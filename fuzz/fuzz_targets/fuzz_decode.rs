// SPDX-License-Identifier: MIT OR Apache-2.0
//! Fuzz output decoding under every encoding.
//!
//! Verifies:
//! 1. `decode` never panics on arbitrary bytes.
//! 2. A failure hands back exactly the input bytes.
//! 3. ISO-8859-1 accepts every input and preserves its length in chars.
#![no_main]
use libfuzzer_sys::fuzz_target;
use subproc_core::{Encoding, StreamKind, SubprocessError, decode};

fuzz_target!(|data: &[u8]| {
    for encoding in Encoding::ALL {
        match decode(data.to_vec(), encoding, StreamKind::Stderr) {
            Ok(text) => {
                if encoding == Encoding::Utf8 {
                    assert_eq!(text.as_bytes(), data);
                }
            }
            Err(SubprocessError::DecodeError {
                bytes,
                encoding: failed,
                stream,
            }) => {
                assert_eq!(bytes, data);
                assert_eq!(failed, encoding);
                assert_eq!(stream, StreamKind::Stderr);
            }
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    let latin1 = Encoding::IsoLatin1
        .decode_bytes(data)
        .expect("latin1 decodes everything");
    assert_eq!(latin1.chars().count(), data.len());
});
