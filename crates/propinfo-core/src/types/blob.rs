use std::{fmt, str::FromStr};
use thiserror::Error as ThisError;

///
/// BlobDecodeError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum BlobDecodeError {
    #[error("hex blob has odd length {len}")]
    OddLength { len: usize },

    #[error("invalid hex digit '{digit}' at offset {offset}")]
    InvalidDigit { digit: char, offset: usize },
}

///
/// Blob
///
/// Opaque byte payload. Text form is lowercase hex.
///

#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Blob(Vec<u8>);

impl Blob {
    #[must_use]
    pub const fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn to_hex(&self) -> String {
        encode_hex(&self.0)
    }

    pub fn from_hex(input: &str) -> Result<Self, BlobDecodeError> {
        decode_hex(input).map(Self)
    }
}

impl fmt::Display for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Blob {
    type Err = BlobDecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<Vec<u8>> for Blob {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for Blob {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<Blob> for Vec<u8> {
    fn from(blob: Blob) -> Self {
        blob.0
    }
}

pub(crate) fn encode_hex(bytes: &[u8]) -> String {
    const DIGITS: &[u8; 16] = b"0123456789abcdef";

    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(char::from(DIGITS[usize::from(byte >> 4)]));
        out.push(char::from(DIGITS[usize::from(byte & 0x0f)]));
    }

    out
}

fn decode_hex(input: &str) -> Result<Vec<u8>, BlobDecodeError> {
    let input = input.trim();
    if input.len() % 2 != 0 {
        return Err(BlobDecodeError::OddLength { len: input.len() });
    }

    let digits = input
        .char_indices()
        .map(|(offset, digit)| {
            digit
                .to_digit(16)
                .map(|d| d as u8)
                .ok_or(BlobDecodeError::InvalidDigit { digit, offset })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(digits
        .chunks_exact(2)
        .map(|pair| (pair[0] << 4) | pair[1])
        .collect())
}

///
/// TESTS
///
