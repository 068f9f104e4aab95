// SPDX-License-Identifier: MIT OR Apache-2.0
//! Text encodings for captured output and the strict decoder over them.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{StreamKind, SubprocessError};

/// Text encoding applied to captured stdout and stderr.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum Encoding {
    /// UTF-8. Invalid sequences fail to decode.
    #[default]
    #[serde(rename = "utf-8", alias = "utf8", alias = "UTF-8")]
    Utf8,
    /// 7-bit US-ASCII. Any byte above `0x7F` fails to decode.
    #[serde(rename = "ascii", alias = "us-ascii", alias = "ASCII")]
    Ascii,
    /// ISO-8859-1. Every byte maps to the code point of the same value, so
    /// decoding never fails.
    #[serde(rename = "iso-8859-1", alias = "latin1", alias = "iso_8859_1")]
    IsoLatin1,
    /// UTF-16 with an optional byte-order mark; big-endian when absent.
    #[serde(rename = "utf-16", alias = "utf16")]
    Utf16,
    /// UTF-16 little-endian, no byte-order mark handling.
    #[serde(rename = "utf-16le", alias = "utf16le")]
    Utf16LittleEndian,
    /// UTF-16 big-endian, no byte-order mark handling.
    #[serde(rename = "utf-16be", alias = "utf16be")]
    Utf16BigEndian,
}

impl Encoding {
    /// Every supported encoding, in declaration order.
    pub const ALL: [Encoding; 6] = [
        Encoding::Utf8,
        Encoding::Ascii,
        Encoding::IsoLatin1,
        Encoding::Utf16,
        Encoding::Utf16LittleEndian,
        Encoding::Utf16BigEndian,
    ];

    /// Canonical label, as accepted by [`FromStr`] and emitted by serde.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Ascii => "ascii",
            Self::IsoLatin1 => "iso-8859-1",
            Self::Utf16 => "utf-16",
            Self::Utf16LittleEndian => "utf-16le",
            Self::Utf16BigEndian => "utf-16be",
        }
    }

    /// Decode `bytes` as text, or `None` if they are not valid in this encoding.
    #[must_use]
    pub fn decode_bytes(self, bytes: &[u8]) -> Option<String> {
        match self {
            Self::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_owned),
            Self::Ascii => bytes
                .is_ascii()
                .then(|| bytes.iter().map(|&b| char::from(b)).collect()),
            Self::IsoLatin1 => Some(bytes.iter().map(|&b| char::from(b)).collect()),
            Self::Utf16 => match bytes {
                [0xFE, 0xFF, rest @ ..] => decode_utf16(rest, u16::from_be_bytes),
                [0xFF, 0xFE, rest @ ..] => decode_utf16(rest, u16::from_le_bytes),
                _ => decode_utf16(bytes, u16::from_be_bytes),
            },
            Self::Utf16LittleEndian => decode_utf16(bytes, u16::from_le_bytes),
            Self::Utf16BigEndian => decode_utf16(bytes, u16::from_be_bytes),
        }
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Option<String> {
    if bytes.len() % 2 != 0 {
        return None;
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).ok()
}

/// Decode captured output from `stream` under `encoding`.
///
/// Fails with [`SubprocessError::DecodeError`] carrying the untouched bytes
/// when they are not valid text in that encoding. The result for a given
/// input is permanent; there is nothing to retry.
pub fn decode(
    bytes: Vec<u8>,
    encoding: Encoding,
    stream: StreamKind,
) -> Result<String, SubprocessError> {
    match encoding.decode_bytes(&bytes) {
        Some(text) => Ok(text),
        None => Err(SubprocessError::DecodeError {
            bytes,
            encoding,
            stream,
        }),
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "utf-8" | "utf8" => Ok(Self::Utf8),
            "ascii" | "us-ascii" => Ok(Self::Ascii),
            "iso-8859-1" | "latin1" | "latin-1" => Ok(Self::IsoLatin1),
            "utf-16" | "utf16" => Ok(Self::Utf16),
            "utf-16le" | "utf16le" => Ok(Self::Utf16LittleEndian),
            "utf-16be" | "utf16be" => Ok(Self::Utf16BigEndian),
            other => Err(format!("unknown encoding: {other}")),
        }
    }
}
