//! BNB Beacon Chain Transaction Signer
//!
//! BNB Beacon Chain 주문을 서명된 바이너리 트랜잭션으로 만드는 라이브러리
//!
//! # 구성
//!
//! - [`bech32`] / [`address`] - Bech32 codec and `bnb`/`tbnb` addresses
//! - [`order`] - the five order kinds and their protobuf encoding
//! - [`preimage`] - canonical JSON that gets signed
//! - [`signer`] - SHA-256 + secp256k1 signing and transaction assembly
//! - [`wallet`] - key pair bound to a chain preset
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! use bnb_tx_signer::{NewOrder, Order, SigningRequest};
//!
//! let order = Order::from(NewOrder { /* ... */ });
//! let tx = SigningRequest::new(&order, &private_key)
//!     .with_account_number(1)
//!     .with_sequence(10)
//!     .build_hex()?;
//! ```

pub mod address;
pub mod amino;
pub mod bech32;
pub mod config;
pub mod errors;
pub mod keys;
pub mod order;
pub mod preimage;
pub mod protobuf;
pub mod signer;
pub mod transaction;
pub mod wallet;

// Re-exports
pub use address::{Address, MAINNET_HRP, TESTNET_HRP};
pub use config::{ChainConfig, Network, SignerConfig, BNB_MAINNET, BNB_TESTNET, DEFAULT_CHAIN_ID};
pub use errors::{SignerError, SignerResult};
pub use keys::{parse_private_key, private_key_to_public_key, public_key_to_key_hash, KeyPair};
pub use order::{
    side, time_in_force, CancelOrder, NewOrder, Order, OrderKind, SendAccount, SendOrder, Token,
    TokenFreeze, TokenUnfreeze,
};
pub use signer::{verify_signature, Signature, SigningRequest};
pub use transaction::{StdSignature, StdTx};
pub use wallet::Wallet;
