//! BNB Beacon Chain Bech32 Address
//!
//! 체인 주소는 (HRP, 키 해시) 쌍이며 Bech32 텍스트로 표현됩니다.
//!
//! # 주소 형식
//!
//! 1. 공개키 (33 bytes, 압축)
//! 2. SHA-256 해시
//! 3. RIPEMD-160 해시 (20 bytes)
//! 4. Bech32 인코딩 (HRP + data)
//!
//! # 예시
//!
//! - Mainnet: bnb1hgm0p7khfk85zpz5v0j8wnej3a90w709vhkdfu
//! - Testnet: tbnb1...

use std::str::FromStr;

use crate::bech32::{self, convert_bits};
use crate::config::Network;
use crate::errors::{SignerError, SignerResult};
use crate::keys::public_key_to_key_hash;

/// Mainnet HRP
pub const MAINNET_HRP: &str = "bnb";
/// Testnet HRP
pub const TESTNET_HRP: &str = "tbnb";

/// Minimum decoded data length in bytes
const MIN_DATA_LENGTH: usize = 2;
/// Maximum decoded data length in bytes
const MAX_DATA_LENGTH: usize = 40;
/// Highest witness version accepted by [`Address::is_valid`]
const MAX_WITNESS_VERSION: u8 = 16;

/// 체인 주소
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    /// Human-readable part
    hrp: String,
    /// Public key hash
    key_hash: Vec<u8>,
}

impl Address {
    /// 키 해시로 주소 생성
    pub fn new(hrp: impl Into<String>, key_hash: impl Into<Vec<u8>>) -> Self {
        Self {
            hrp: hrp.into(),
            key_hash: key_hash.into(),
        }
    }

    /// 메인넷 주소 생성
    pub fn mainnet(key_hash: impl Into<Vec<u8>>) -> Self {
        Self::new(MAINNET_HRP, key_hash)
    }

    /// 테스트넷 주소 생성
    pub fn testnet(key_hash: impl Into<Vec<u8>>) -> Self {
        Self::new(TESTNET_HRP, key_hash)
    }

    /// 공개키에서 주소 생성
    ///
    /// # Process
    /// 1. SHA-256(public_key)
    /// 2. RIPEMD-160(sha256_result)
    pub fn from_public_key(network: Network, public_key: &[u8; 33]) -> Self {
        Self::new(network.hrp(), public_key_to_key_hash(public_key).to_vec())
    }

    pub fn hrp(&self) -> &str {
        &self.hrp
    }

    pub fn key_hash(&self) -> &[u8] {
        &self.key_hash
    }

    /// HRP에 해당하는 네트워크 (알 수 없는 HRP면 None)
    pub fn network(&self) -> Option<Network> {
        Network::from_hrp(&self.hrp)
    }

    /// 주소 문자열 검증
    ///
    /// The first data group is read as a witness version and the remaining
    /// groups as the program; the HRP is not checked. Version 0 programs must
    /// be 20 or 32 bytes. Canonical chain addresses carry no version group,
    /// so most of them do not pass this check; [`Address::decode`] is the
    /// parser for those.
    pub fn is_valid(text: &str) -> bool {
        let (_, data) = match bech32::decode(text) {
            Ok(decoded) => decoded,
            Err(_) => return false,
        };
        let Some((&version, program)) = data.split_first() else {
            return false;
        };

        let Some(conv) = convert_bits::<5, 8, false>(program) else {
            return false;
        };

        if conv.len() < MIN_DATA_LENGTH || conv.len() > MAX_DATA_LENGTH {
            return false;
        }
        if version > MAX_WITNESS_VERSION {
            return false;
        }
        if version == 0 && conv.len() != 20 && conv.len() != 32 {
            return false;
        }
        true
    }

    /// 주소 디코딩
    ///
    /// Requires the `bnb` or `tbnb` HRP and converts the whole data part to
    /// bytes. Unlike [`Address::is_valid`] there is no 20/32-byte rule here.
    pub fn decode(text: &str) -> SignerResult<Self> {
        let (hrp, data) =
            bech32::decode(text).map_err(|_| SignerError::invalid_address(text))?;
        if data.is_empty() {
            return Err(SignerError::invalid_address(text));
        }

        if Network::from_hrp(&hrp).is_none() {
            return Err(SignerError::invalid_address(text));
        }

        let conv = convert_bits::<5, 8, false>(&data)
            .ok_or_else(|| SignerError::invalid_address(text))?;
        if conv.len() < MIN_DATA_LENGTH || conv.len() > MAX_DATA_LENGTH {
            return Err(SignerError::invalid_address(text));
        }

        Ok(Self {
            hrp,
            key_hash: conv,
        })
    }

    /// 주소 인코딩
    ///
    /// The result is decoded again before it is returned; anything this
    /// crate cannot parse back is reported as an error instead.
    pub fn encode(&self) -> SignerResult<String> {
        let groups = convert_bits::<8, 5, true>(&self.key_hash)
            .ok_or_else(|| SignerError::invalid_address(hex::encode(&self.key_hash)))?;
        let encoded = bech32::encode(&self.hrp, &groups)
            .map_err(|_| SignerError::invalid_address(hex::encode(&self.key_hash)))?;

        if Self::decode(&encoded).is_err() {
            return Err(SignerError::invalid_address(encoded));
        }
        Ok(encoded)
    }
}

impl FromStr for Address {
    type Err = SignerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}
