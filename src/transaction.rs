//! Transaction Messages
//!
//! The signature entry and the standard transaction that carry a signed
//! order to the chain.
//!
//! # Supported Types
//!
//! - `StdSignature` - public key, signature and replay-protection numbers
//! - `StdTx` - msgs, signatures, memo and source, framed as `auth/StdTx`
//!
//! # Wire Layout
//!
//! ```text
//! [varint len][F0625DEE][StdTx protobuf]
//!   msgs[i]       = [order type prefix][order protobuf]
//!   signatures[i] = [StdSignature protobuf]
//! ```

use crate::amino::{encode_public_key, type_prefix, wrap};
use crate::errors::{SignerError, SignerResult};
use crate::protobuf::*;

// ============================================================================
// Signature
// ============================================================================

/// Signature entry of a transaction
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StdSignature {
    /// Amino-encoded public key (`[EB5AE987][21][33 bytes]`)
    pub pub_key: Vec<u8>,
    /// 64-byte r || s
    pub signature: Vec<u8>,
    pub account_number: i64,
    pub sequence: i64,
}

impl StdSignature {
    /// Create a signature entry from a compressed public key
    pub fn new(
        public_key: &[u8; 33],
        signature: &[u8; 64],
        account_number: i64,
        sequence: i64,
    ) -> Self {
        Self {
            pub_key: encode_public_key(public_key),
            signature: signature.to_vec(),
            account_number,
            sequence,
        }
    }

    /// Encode to protobuf bytes
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        // Field 1: pub_key (bytes)
        encode_bytes(&mut buf, 1, &self.pub_key);
        // Field 2: signature (bytes)
        encode_bytes(&mut buf, 2, &self.signature);
        // Field 3: account_number (int64)
        encode_int64(&mut buf, 3, self.account_number);
        // Field 4: sequence (int64)
        encode_int64(&mut buf, 4, self.sequence);
        buf
    }

    /// Entry as placed in a transaction's signatures (no type prefix, no length)
    pub fn to_envelope(&self) -> Vec<u8> {
        wrap(&self.encode(), &[], false)
    }

    /// Decode from protobuf bytes
    pub fn decode(bytes: &[u8]) -> SignerResult<Self> {
        let mut sig = Self::default();
        for field in FieldReader::new(bytes) {
            let (number, value) = field?;
            match number {
                1 => sig.pub_key = value.as_bytes(number)?.to_vec(),
                2 => sig.signature = value.as_bytes(number)?.to_vec(),
                3 => sig.account_number = value.as_int64(number)?,
                4 => sig.sequence = value.as_int64(number)?,
                _ => {}
            }
        }
        Ok(sig)
    }

    /// Compressed public key inside the amino-encoded `pub_key`
    pub fn public_key(&self) -> SignerResult<[u8; 33]> {
        let rest = self
            .pub_key
            .strip_prefix(type_prefix::PUB_KEY.as_slice())
            .ok_or_else(|| SignerError::invalid_encoding("public key type prefix missing"))?;
        let (len, used) = decode_varint(rest)?;
        let key = &rest[used..];
        if len != 33 || key.len() != 33 {
            return Err(SignerError::invalid_encoding(format!(
                "expected 33-byte public key, got {}",
                key.len()
            )));
        }
        let mut result = [0u8; 33];
        result.copy_from_slice(key);
        Ok(result)
    }
}

// ============================================================================
// Transaction
// ============================================================================

/// Standard transaction (`auth/StdTx`)
///
/// This is the final format broadcast to the network.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StdTx {
    /// Order envelopes
    pub msgs: Vec<Vec<u8>>,
    /// Signature envelopes
    pub signatures: Vec<Vec<u8>>,
    pub memo: String,
    /// Source identifier, 0 if undisclosed
    pub source: i64,
}

impl StdTx {
    /// Create a new transaction
    pub fn new(
        msgs: Vec<Vec<u8>>,
        signatures: Vec<Vec<u8>>,
        memo: impl Into<String>,
        source: i64,
    ) -> Self {
        Self {
            msgs,
            signatures,
            memo: memo.into(),
            source,
        }
    }

    /// Encode to protobuf bytes
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        // Field 1: msgs (repeated bytes)
        for msg in &self.msgs {
            encode_length_delimited(&mut buf, 1, msg);
        }
        // Field 2: signatures (repeated bytes)
        for sig in &self.signatures {
            encode_length_delimited(&mut buf, 2, sig);
        }
        // Field 3: memo (string)
        encode_string(&mut buf, 3, &self.memo);
        // Field 4: source (int64)
        encode_int64(&mut buf, 4, self.source);
        buf
    }

    /// Length-prefixed, type-prefixed bytes ready to broadcast
    pub fn to_envelope(&self) -> Vec<u8> {
        wrap(&self.encode(), &type_prefix::TRANSACTION, true)
    }

    /// Encode to hex string for broadcasting
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_envelope())
    }

    /// Parse bytes produced by [`StdTx::to_envelope`]
    pub fn from_envelope(envelope: &[u8]) -> SignerResult<Self> {
        let (len, used) = decode_varint(envelope)?;
        let body = &envelope[used..];
        if len != body.len() as u64 {
            return Err(SignerError::invalid_encoding(format!(
                "length prefix {len} does not match {} remaining bytes",
                body.len()
            )));
        }
        let payload = body
            .strip_prefix(type_prefix::TRANSACTION.as_slice())
            .ok_or_else(|| SignerError::invalid_encoding("transaction type prefix missing"))?;
        Self::decode(payload)
    }

    /// Decode from protobuf bytes
    pub fn decode(bytes: &[u8]) -> SignerResult<Self> {
        let mut tx = Self::default();
        for field in FieldReader::new(bytes) {
            let (number, value) = field?;
            match number {
                1 => tx.msgs.push(value.as_bytes(number)?.to_vec()),
                2 => tx.signatures.push(value.as_bytes(number)?.to_vec()),
                3 => tx.memo = value.as_string(number)?,
                4 => tx.source = value.as_int64(number)?,
                _ => {}
            }
        }
        Ok(tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_public_key() -> [u8; 33] {
        hex::decode("029729a52e4e3c2b4a4e52aa74033eedaf8ba1df5ab6d1f518fd69e67bbd309b0e")
            .unwrap()
            .try_into()
            .unwrap()
    }

    #[test]
    fn test_std_signature_encode() {
        let sig = StdSignature::new(&sample_public_key(), &[0x11; 64], 1, 10);
        let encoded = sig.to_envelope();
        assert_eq!(&encoded[..2], &[0x0a, 0x26]);
        assert_eq!(&encoded[2..6], &type_prefix::PUB_KEY);
        assert_eq!(&encoded[40..42], &[0x12, 0x40]);
        assert_eq!(hex::encode(&encoded[106..]), "1801200a");
    }

    #[test]
    fn test_std_signature_decode() {
        let sig = StdSignature::new(&sample_public_key(), &[0x22; 64], 19, 23);
        let decoded = StdSignature::decode(&sig.encode()).unwrap();
        assert_eq!(decoded, sig);
        assert_eq!(decoded.public_key().unwrap(), sample_public_key());
    }

    #[test]
    fn test_std_signature_public_key_malformed() {
        let sig = StdSignature {
            pub_key: vec![0x01, 0x02],
            ..Default::default()
        };
        assert!(sig.public_key().is_err());
    }

    #[test]
    fn test_std_tx_memo_and_source() {
        let tx = StdTx::new(vec![vec![0xAA]], vec![vec![0xBB]], "test", 1);
        assert_eq!(hex::encode(tx.encode()), "0a01aa1201bb1a04746573742001");
    }

    #[test]
    fn test_std_tx_empty_memo_omitted() {
        let tx = StdTx::new(vec![vec![0xAA]], vec![], "", 0);
        assert_eq!(hex::encode(tx.encode()), "0a01aa");
    }

    #[test]
    fn test_std_tx_ignores_unknown_fields() {
        // field 5 (bytes) is not part of the transaction and is skipped
        let bytes = hex::decode("0a01aa2a02beef2001").unwrap();
        let tx = StdTx::decode(&bytes).unwrap();
        assert_eq!(tx, StdTx::new(vec![vec![0xAA]], vec![], "", 1));
        assert_eq!(hex::encode(tx.encode()), "0a01aa2001");
    }

    #[test]
    fn test_std_tx_envelope_round_trip() {
        let tx = StdTx::new(vec![vec![1, 2, 3]], vec![vec![4, 5]], "memo", 7);
        let envelope = tx.to_envelope();
        assert_eq!(&envelope[1..5], &type_prefix::TRANSACTION);
        assert_eq!(StdTx::from_envelope(&envelope).unwrap(), tx);
    }

    #[test]
    fn test_std_tx_envelope_length_mismatch() {
        let mut envelope = StdTx::new(vec![vec![1]], vec![], "", 0).to_envelope();
        envelope.push(0x00);
        assert!(matches!(
            StdTx::from_envelope(&envelope),
            Err(SignerError::InvalidEncoding { .. })
        ));
    }

    #[test]
    fn test_std_tx_wrong_prefix() {
        let envelope = wrap(&[0x0a, 0x00], &type_prefix::NEW_ORDER, true);
        assert!(StdTx::from_envelope(&envelope).is_err());
    }
}
