//! Transaction Signing
//!
//! 주문과 서명자 정보를 서명된 트랜잭션 바이트로 만듭니다.
//!
//! # 서명 절차
//!
//! 1. Preimage: 정렬된 JSON 문서 (see [`crate::preimage`])
//! 2. Digest: SHA-256(preimage)
//! 3. Signature: secp256k1 ECDSA, RFC 6979 nonce, low-S, 64 bytes r || s
//! 4. Public key: 33바이트 압축 공개키
//! 5. Signature envelope: `StdSignature` protobuf
//! 6. Order envelope: `[type prefix][order protobuf]`
//! 7. Transaction envelope: `[varint len][F0625DEE][StdTx protobuf]`
//!
//! Any failing stage aborts the build; a partial transaction is never returned.

use k256::ecdsa::{
    signature::hazmat::{PrehashSigner, PrehashVerifier},
    Signature as K256Signature, VerifyingKey,
};
use sha2::{Digest, Sha256};
use tracing::{debug, trace};

use crate::config::{SignerConfig, DEFAULT_CHAIN_ID};
use crate::errors::{SignerError, SignerResult};
use crate::keys::{private_key_to_public_key, signing_key};
use crate::order::Order;
use crate::preimage::build_preimage;
use crate::transaction::{StdSignature, StdTx};

/// ECDSA 서명 (r, s)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// r 값 (32 bytes)
    pub r: [u8; 32],
    /// s 값 (32 bytes)
    pub s: [u8; 32],
}

impl Signature {
    /// 새 서명 생성
    pub fn new(r: [u8; 32], s: [u8; 32]) -> Self {
        Self { r, s }
    }

    /// 64바이트 형식으로 변환 (r || s)
    pub fn to_bytes(&self) -> [u8; 64] {
        let mut bytes = [0u8; 64];
        bytes[..32].copy_from_slice(&self.r);
        bytes[32..].copy_from_slice(&self.s);
        bytes
    }

    /// 64바이트에서 파싱
    pub fn from_bytes(bytes: &[u8]) -> SignerResult<Self> {
        if bytes.len() != 64 {
            return Err(SignerError::InvalidSignature {
                message: format!("Expected 64 bytes, got {}", bytes.len()),
            });
        }

        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);

        Ok(Self { r, s })
    }

    /// Base64 인코딩
    pub fn to_base64(&self) -> String {
        use base64::Engine;
        base64::engine::general_purpose::STANDARD.encode(self.to_bytes())
    }

    /// Base64 디코딩
    pub fn from_base64(encoded: &str) -> SignerResult<Self> {
        use base64::Engine;
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| SignerError::InvalidSignature {
                message: format!("Invalid base64: {e}"),
            })?;
        Self::from_bytes(&bytes)
    }

    /// Hex 인코딩
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Hex 디코딩
    pub fn from_hex(hex_str: &str) -> SignerResult<Self> {
        let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        let bytes = hex::decode(hex_str).map_err(|e| SignerError::InvalidSignature {
            message: format!("Invalid hex: {e}"),
        })?;
        Self::from_bytes(&bytes)
    }
}

/// 서명 요청
///
/// One transaction's worth of signer metadata. Borrows the order and the
/// private key for the duration of the request; each `build`/`sign` call is
/// independent and leaves the inputs untouched.
#[derive(Clone)]
pub struct SigningRequest<'a> {
    /// 체인 ID
    pub chain_id: String,
    /// 계정 번호
    pub account_number: i64,
    /// 다음 트랜잭션의 시퀀스
    pub sequence: i64,
    /// 소스 ID (공개하지 않으려면 0)
    pub source: i64,
    /// 메모 (Send 외의 주문에 메모가 있으면 체인이 거부)
    pub memo: String,
    /// 개인키 (32 bytes)
    pub private_key: &'a [u8; 32],
    /// 서명할 주문
    pub order: &'a Order,
}

impl<'a> SigningRequest<'a> {
    /// 기본값으로 서명 요청 생성 (chain id `chain-bnb`, 나머지 0/빈 값)
    pub fn new(order: &'a Order, private_key: &'a [u8; 32]) -> Self {
        Self {
            chain_id: DEFAULT_CHAIN_ID.to_string(),
            account_number: 0,
            sequence: 0,
            source: 0,
            memo: String::new(),
            private_key,
            order,
        }
    }

    /// 설정값을 적용한 서명 요청 생성
    pub fn from_config(config: &SignerConfig, order: &'a Order, private_key: &'a [u8; 32]) -> Self {
        Self::new(order, private_key)
            .with_chain_id(config.chain_id())
            .with_source(config.source())
            .with_memo(config.memo())
    }

    /// 체인 ID 설정
    pub fn with_chain_id(mut self, chain_id: impl Into<String>) -> Self {
        self.chain_id = chain_id.into();
        self
    }

    /// 계정 번호 설정
    pub fn with_account_number(mut self, account_number: i64) -> Self {
        self.account_number = account_number;
        self
    }

    /// 시퀀스 설정
    pub fn with_sequence(mut self, sequence: i64) -> Self {
        self.sequence = sequence;
        self
    }

    /// 소스 ID 설정
    pub fn with_source(mut self, source: i64) -> Self {
        self.source = source;
        self
    }

    /// 메모 설정
    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    /// 서명 대상 JSON 바이트
    pub fn preimage(&self) -> SignerResult<Vec<u8>> {
        build_preimage(self)
    }

    /// 주문 서명
    ///
    /// # Returns
    ///
    /// 64바이트 서명 (r || s)
    pub fn sign(&self) -> SignerResult<Signature> {
        let preimage = self.preimage()?;
        trace!(preimage_len = preimage.len(), "built signing preimage");
        sign_bytes(self.private_key, &preimage)
    }

    /// 서명된 트랜잭션 빌드
    ///
    /// # Returns
    ///
    /// 브로드캐스트 가능한 트랜잭션 바이트
    pub fn build(&self) -> SignerResult<Vec<u8>> {
        let kind = self.order.kind();
        debug!(
            order = kind.name(),
            chain_id = %self.chain_id,
            account_number = self.account_number,
            sequence = self.sequence,
            "building transaction"
        );

        let signature = self.sign()?;
        let signature_envelope = self.encode_signature(&signature)?;
        let order_envelope = self.order.to_envelope();
        trace!(
            order_len = order_envelope.len(),
            signature_len = signature_envelope.len(),
            "encoded envelopes"
        );

        let tx = StdTx::new(
            vec![order_envelope],
            vec![signature_envelope],
            self.memo.clone(),
            self.source,
        );
        let bytes = tx.to_envelope();
        debug!(order = kind.name(), tx_len = bytes.len(), "built transaction");
        Ok(bytes)
    }

    /// [`SigningRequest::build`] as a hex string
    pub fn build_hex(&self) -> SignerResult<String> {
        self.build().map(hex::encode)
    }

    fn encode_signature(&self, signature: &Signature) -> SignerResult<Vec<u8>> {
        let public_key = private_key_to_public_key(self.private_key)?;
        let entry = StdSignature::new(
            &public_key,
            &signature.to_bytes(),
            self.account_number,
            self.sequence,
        );
        Ok(entry.to_envelope())
    }
}

impl std::fmt::Debug for SigningRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningRequest")
            .field("chain_id", &self.chain_id)
            .field("account_number", &self.account_number)
            .field("sequence", &self.sequence)
            .field("source", &self.source)
            .field("memo", &self.memo)
            .field("private_key", &"[REDACTED]")
            .field("order", &self.order)
            .finish()
    }
}

/// 바이트 데이터 서명 (SHA256 해시 후 서명)
pub fn sign_bytes(private_key: &[u8; 32], data: &[u8]) -> SignerResult<Signature> {
    let hash = Sha256::digest(data);
    sign_hash(private_key, hash.as_slice())
}

/// 해시 직접 서명
///
/// # Arguments
///
/// * `private_key` - 32바이트 개인키
/// * `hash` - 32바이트 해시
pub fn sign_hash(private_key: &[u8; 32], hash: &[u8]) -> SignerResult<Signature> {
    let signing_key = signing_key(private_key)?;

    let signature: K256Signature =
        signing_key
            .sign_prehash(hash)
            .map_err(|e| SignerError::InvalidSignature {
                message: format!("Signing failed: {e}"),
            })?;

    Signature::from_bytes(&signature.to_bytes())
}

/// 서명 검증
///
/// # Arguments
///
/// * `public_key` - 33바이트 압축 공개키
/// * `data` - 원본 데이터 (preimage)
/// * `signature` - 검증할 서명
pub fn verify_signature(
    public_key: &[u8; 33],
    data: &[u8],
    signature: &Signature,
) -> SignerResult<bool> {
    let verifying_key =
        VerifyingKey::from_sec1_bytes(public_key).map_err(|e| SignerError::InvalidSignature {
            message: format!("Invalid public key: {e}"),
        })?;

    let hash = Sha256::digest(data);

    let k256_sig = K256Signature::from_slice(&signature.to_bytes()).map_err(|e| {
        SignerError::InvalidSignature {
            message: format!("Invalid signature format: {e}"),
        }
    })?;

    Ok(verifying_key.verify_prehash(&hash, &k256_sig).is_ok())
}
