//! secp256k1 Key Utilities
//!
//! 개인키 파싱, 압축 공개키 계산, 주소용 키 해시(Hash160)를 제공합니다.
//!
//! Key erasure stays with the caller; nothing here keeps a copy of key
//! material beyond the value it returns.

use k256::ecdsa::SigningKey;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

use crate::errors::{SignerError, SignerResult};

/// 키 쌍
#[derive(Clone)]
pub struct KeyPair {
    /// 개인키 (32 bytes)
    pub private_key: [u8; 32],
    /// 압축 공개키 (33 bytes)
    pub public_key: [u8; 33],
}

impl KeyPair {
    /// 개인키에서 키 쌍 생성
    pub fn from_private_key(private_key: [u8; 32]) -> SignerResult<Self> {
        let public_key = private_key_to_public_key(&private_key)?;
        Ok(Self {
            private_key,
            public_key,
        })
    }

    /// 공개키 hex 문자열 반환
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public_key)
    }

    /// 주소용 키 해시 (20 bytes)
    pub fn key_hash(&self) -> [u8; 20] {
        public_key_to_key_hash(&self.public_key)
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key_hex())
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

pub(crate) fn signing_key(private_key: &[u8; 32]) -> SignerResult<SigningKey> {
    SigningKey::from_bytes(private_key.into()).map_err(|e| SignerError::InvalidPrivateKey {
        message: format!("Invalid private key: {e}"),
    })
}

/// 개인키에서 압축 공개키 생성
///
/// # Returns
///
/// 33바이트 압축 공개키
pub fn private_key_to_public_key(private_key: &[u8; 32]) -> SignerResult<[u8; 33]> {
    let signing_key = signing_key(private_key)?;
    let compressed = signing_key.verifying_key().to_encoded_point(true);

    let mut result = [0u8; 33];
    result.copy_from_slice(compressed.as_bytes());
    Ok(result)
}

/// RIPEMD-160(SHA-256(public_key))
pub fn public_key_to_key_hash(public_key: &[u8; 33]) -> [u8; 20] {
    let sha256_hash = Sha256::digest(public_key);
    let ripemd_hash = Ripemd160::digest(sha256_hash);

    let mut result = [0u8; 20];
    result.copy_from_slice(&ripemd_hash);
    result
}

/// Hex 문자열에서 개인키 파싱
pub fn parse_private_key(hex_str: &str) -> SignerResult<[u8; 32]> {
    let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
    let bytes = hex::decode(hex_str).map_err(|e| SignerError::InvalidPrivateKey {
        message: format!("Invalid hex: {e}"),
    })?;

    bytes
        .try_into()
        .map_err(|bytes: Vec<u8>| SignerError::InvalidPrivateKey {
            message: format!("Expected 32 bytes, got {}", bytes.len()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORDER_KEY: &str = "90335b9d2153ad1a9799a3ccc070bd64b4164e9642ee1dd48053c33f9a3a05e9";
    const SEND_KEY: &str = "95949f757db1f57ca94a5dff23314accbe7abee89597bf6a3c7382c84d7eb832";

    #[test]
    fn test_private_key_to_public_key() {
        let private_key = parse_private_key(ORDER_KEY).unwrap();
        let public_key = private_key_to_public_key(&private_key).unwrap();
        assert_eq!(
            hex::encode(public_key),
            "029729a52e4e3c2b4a4e52aa74033eedaf8ba1df5ab6d1f518fd69e67bbd309b0e"
        );
    }

    #[test]
    fn test_key_hash() {
        let keypair = KeyPair::from_private_key(parse_private_key(SEND_KEY).unwrap()).unwrap();
        assert_eq!(
            keypair.public_key_hex(),
            "026a35920088d98c3888ca68c53dfc93f4564602606cbb87f0fe5ee533db38e502"
        );
        assert_eq!(
            hex::encode(keypair.key_hash()),
            "40c2979694bbc961023d1d27be6fc4d21a9febe6"
        );
    }

    #[test]
    fn test_invalid_private_keys() {
        // zero and the group order are both outside [1, n)
        assert!(private_key_to_public_key(&[0u8; 32]).is_err());
        let order =
            parse_private_key("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141")
                .unwrap();
        assert!(matches!(
            private_key_to_public_key(&order),
            Err(SignerError::InvalidPrivateKey { .. })
        ));
    }

    #[test]
    fn test_parse_private_key() {
        let with_prefix = parse_private_key(&format!("0x{ORDER_KEY}")).unwrap();
        let without = parse_private_key(ORDER_KEY).unwrap();
        assert_eq!(with_prefix, without);

        assert!(parse_private_key("abcd").is_err());
        assert!(parse_private_key("zz").is_err());
    }

    #[test]
    fn test_keypair_debug_redacts() {
        let keypair = KeyPair::from_private_key(parse_private_key(ORDER_KEY).unwrap()).unwrap();
        let debug = format!("{keypair:?}");
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains(ORDER_KEY));
    }
}
