//! Signer Error Types
//!
//! 주소 인코딩, 주문 직렬화, 트랜잭션 서명 과정의 모든 실패를 하나의 enum으로 표현합니다.
//!
//! - Malformed text
//!   - InvalidBech32
//! - Unsupported address form
//!   - InvalidAddress
//! - Unsupported order variant
//!   - UnsupportedOrder
//! - Encoding
//!   - InvalidEncoding
//!   - JsonError
//! - Cryptographic
//!   - InvalidPrivateKey
//!   - InvalidSignature
//!
//! Every failure is a deterministic function of the input, so there are no
//! retry helpers here: the caller fixes the input and calls again.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignerError {
    /// Bech32 text failed to parse (charset, case, length, checksum)
    #[error("Invalid bech32: {message}")]
    InvalidBech32 { message: String },

    /// Address decoded to an unsupported prefix or hash length
    #[error("Invalid address: {address}")]
    InvalidAddress { address: String },

    /// Order type prefix is not one of the known variants
    #[error("Unsupported order type: {message}")]
    UnsupportedOrder { message: String },

    /// Malformed protobuf/amino bytes, or bytes not representable in the preimage
    #[error("Invalid encoding: {message}")]
    InvalidEncoding { message: String },

    /// JSON serialization or config parsing failure
    #[error("JSON error: {message}")]
    JsonError { message: String },

    /// Private key rejected by the curve
    #[error("Invalid private key: {message}")]
    InvalidPrivateKey { message: String },

    /// Signature could not be produced, parsed or checked
    #[error("Invalid signature: {message}")]
    InvalidSignature { message: String },
}

impl SignerError {
    /// Returns the error code as a string constant
    pub fn code(&self) -> &'static str {
        match self {
            SignerError::InvalidBech32 { .. } => "INVALID_BECH32",
            SignerError::InvalidAddress { .. } => "INVALID_ADDRESS",
            SignerError::UnsupportedOrder { .. } => "UNSUPPORTED_ORDER",
            SignerError::InvalidEncoding { .. } => "INVALID_ENCODING",
            SignerError::JsonError { .. } => "JSON_ERROR",
            SignerError::InvalidPrivateKey { .. } => "INVALID_PRIVATE_KEY",
            SignerError::InvalidSignature { .. } => "INVALID_SIGNATURE",
        }
    }

    /// Returns true if the failure was caused by caller-supplied text or order data
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            SignerError::InvalidBech32 { .. }
                | SignerError::InvalidAddress { .. }
                | SignerError::UnsupportedOrder { .. }
                | SignerError::InvalidEncoding { .. }
                | SignerError::JsonError { .. }
        )
    }

    /// Returns true if the failure came from the signing primitives
    pub fn is_crypto_error(&self) -> bool {
        matches!(
            self,
            SignerError::InvalidPrivateKey { .. } | SignerError::InvalidSignature { .. }
        )
    }

    pub(crate) fn invalid_address(address: impl Into<String>) -> Self {
        SignerError::InvalidAddress {
            address: address.into(),
        }
    }

    pub(crate) fn invalid_encoding(message: impl Into<String>) -> Self {
        SignerError::InvalidEncoding {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for SignerError {
    fn from(err: serde_json::Error) -> Self {
        SignerError::JsonError {
            message: err.to_string(),
        }
    }
}

/// Result 타입 alias
pub type SignerResult<T> = Result<T, SignerError>;
