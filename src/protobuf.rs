//! Protobuf Wire Format Utilities
//!
//! Low-level protobuf encoding and decoding used by the order, signature and
//! transaction messages. Messages follow proto3 rules: scalar fields holding
//! their default value are not written.
//!
//! # Wire Types
//!
//! | Type | Meaning | Used For |
//! |------|---------|----------|
//! | 0 | Varint | int64, bool, enum |
//! | 1 | 64-bit | fixed64 (skipped on decode) |
//! | 2 | Length-delimited | string, bytes, embedded messages |
//! | 5 | 32-bit | fixed32 (skipped on decode) |
//!
//! # Example
//!
//! ```ignore
//! use bnb_tx_signer::protobuf::*;
//!
//! let mut buf = Vec::new();
//! encode_string(&mut buf, 2, "BTC-5C4_BNB");
//! encode_int64(&mut buf, 6, 100_000_000);
//! ```
//!
//! # References
//!
//! - [Protocol Buffers Encoding](https://protobuf.dev/programming-guides/encoding/)

use crate::errors::{SignerError, SignerResult};

/// Wire type constants
pub mod wire_type {
    /// Varint: int32, int64, uint32, uint64, sint32, sint64, bool, enum
    pub const VARINT: u8 = 0;
    /// 64-bit: fixed64, sfixed64, double
    pub const FIXED64: u8 = 1;
    /// Length-delimited: string, bytes, embedded messages, packed repeated fields
    pub const LENGTH_DELIMITED: u8 = 2;
    /// 32-bit: fixed32, sfixed32, float
    pub const FIXED32: u8 = 5;
}

/// Encode a variable-length integer (varint)
///
/// Varints are a method of serializing integers using one or more bytes.
/// Smaller numbers take a smaller number of bytes.
#[inline]
pub fn encode_varint(buf: &mut Vec<u8>, value: u64) {
    let mut v = value;
    while v >= 0x80 {
        buf.push((v as u8) | 0x80);
        v >>= 7;
    }
    buf.push(v as u8);
}

/// Encode a field tag (field number + wire type)
#[inline]
pub fn encode_tag(buf: &mut Vec<u8>, field_number: u32, wire_type: u8) {
    encode_varint(buf, (u64::from(field_number) << 3) | u64::from(wire_type));
}

/// Encode an int64 field
///
/// Negative values take the full ten bytes (two's complement as uint64).
/// Skips encoding if value is 0 (protobuf default behavior).
#[inline]
pub fn encode_int64(buf: &mut Vec<u8>, field_number: u32, value: i64) {
    if value == 0 {
        return;
    }
    encode_tag(buf, field_number, wire_type::VARINT);
    encode_varint(buf, value as u64);
}

/// Encode a string field
///
/// Skips encoding if value is empty (protobuf default behavior).
#[inline]
pub fn encode_string(buf: &mut Vec<u8>, field_number: u32, value: &str) {
    encode_bytes(buf, field_number, value.as_bytes());
}

/// Encode a bytes field
///
/// Skips encoding if value is empty (protobuf default behavior).
#[inline]
pub fn encode_bytes(buf: &mut Vec<u8>, field_number: u32, value: &[u8]) {
    if value.is_empty() {
        return;
    }
    encode_length_delimited(buf, field_number, value);
}

/// Encode a length-delimited field (for embedded messages and repeated bytes)
///
/// Unlike `encode_bytes`, this always encodes even if value is empty,
/// which is needed for embedded message fields.
#[inline]
pub fn encode_length_delimited(buf: &mut Vec<u8>, field_number: u32, value: &[u8]) {
    encode_tag(buf, field_number, wire_type::LENGTH_DELIMITED);
    encode_varint(buf, value.len() as u64);
    buf.extend_from_slice(value);
}

/// Decode a varint from the front of `input`
///
/// # Returns
///
/// (value, bytes consumed)
pub fn decode_varint(input: &[u8]) -> SignerResult<(u64, usize)> {
    let mut value: u64 = 0;
    for (i, &byte) in input.iter().enumerate().take(10) {
        value |= u64::from(byte & 0x7f) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }
    Err(SignerError::invalid_encoding("truncated or overlong varint"))
}

/// A single decoded field value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Varint(u64),
    LengthDelimited(&'a [u8]),
    Fixed64(u64),
    Fixed32(u32),
}

impl<'a> FieldValue<'a> {
    /// Varint field as int64
    pub fn as_int64(&self, field_number: u32) -> SignerResult<i64> {
        match self {
            FieldValue::Varint(v) => Ok(*v as i64),
            _ => Err(wrong_wire_type(field_number)),
        }
    }

    /// Length-delimited field as raw bytes
    pub fn as_bytes(&self, field_number: u32) -> SignerResult<&'a [u8]> {
        match self {
            FieldValue::LengthDelimited(bytes) => Ok(bytes),
            _ => Err(wrong_wire_type(field_number)),
        }
    }

    /// Length-delimited field as UTF-8 string
    pub fn as_string(&self, field_number: u32) -> SignerResult<String> {
        let bytes = self.as_bytes(field_number)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| {
            SignerError::invalid_encoding(format!("field {field_number} is not valid UTF-8"))
        })
    }
}

fn wrong_wire_type(field_number: u32) -> SignerError {
    SignerError::invalid_encoding(format!("unexpected wire type for field {field_number}"))
}

/// Iterator over the (field number, value) pairs of a message
///
/// Yields an error and then stops if the input is malformed.
pub struct FieldReader<'a> {
    input: &'a [u8],
    failed: bool,
}

impl<'a> FieldReader<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            failed: false,
        }
    }

    fn take(&mut self, len: usize) -> SignerResult<&'a [u8]> {
        if len > self.input.len() {
            return Err(SignerError::invalid_encoding("field length exceeds input"));
        }
        let (head, rest) = self.input.split_at(len);
        self.input = rest;
        Ok(head)
    }

    fn read_field(&mut self) -> SignerResult<(u32, FieldValue<'a>)> {
        let (key, used) = decode_varint(self.input)?;
        self.input = &self.input[used..];

        let field_number = u32::try_from(key >> 3)
            .map_err(|_| SignerError::invalid_encoding("field number out of range"))?;
        if field_number == 0 {
            return Err(SignerError::invalid_encoding("field number 0"));
        }

        let value = match (key & 0x07) as u8 {
            wire_type::VARINT => {
                let (v, used) = decode_varint(self.input)?;
                self.input = &self.input[used..];
                FieldValue::Varint(v)
            }
            wire_type::FIXED64 => {
                let bytes = self.take(8)?;
                let mut arr = [0u8; 8];
                arr.copy_from_slice(bytes);
                FieldValue::Fixed64(u64::from_le_bytes(arr))
            }
            wire_type::LENGTH_DELIMITED => {
                let (len, used) = decode_varint(self.input)?;
                self.input = &self.input[used..];
                let len = usize::try_from(len)
                    .map_err(|_| SignerError::invalid_encoding("field length out of range"))?;
                FieldValue::LengthDelimited(self.take(len)?)
            }
            wire_type::FIXED32 => {
                let bytes = self.take(4)?;
                let mut arr = [0u8; 4];
                arr.copy_from_slice(bytes);
                FieldValue::Fixed32(u32::from_le_bytes(arr))
            }
            other => {
                return Err(SignerError::invalid_encoding(format!(
                    "unsupported wire type {other}"
                )))
            }
        };
        Ok((field_number, value))
    }
}

impl<'a> Iterator for FieldReader<'a> {
    type Item = SignerResult<(u32, FieldValue<'a>)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.input.is_empty() {
            return None;
        }
        let field = self.read_field();
        self.failed = field.is_err();
        Some(field)
    }
}
