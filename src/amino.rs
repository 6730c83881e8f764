//! Amino Binary Framing
//!
//! Amino frames a protobuf payload with a 4-byte type prefix and, for the
//! outermost transaction, a varint length:
//!
//! ```text
//! [varint(len(prefix) + len(payload))]?  [prefix; 0 or 4]  [payload]
//! ```
//!
//! The same primitive builds the order envelope (prefix, no length), the
//! signature entry (neither) and the transaction envelope (both).

use crate::protobuf::encode_varint;

/// Amino registered type prefixes
///
/// Protocol constants from the chain's amino codec registration
/// (`cosmos-sdk/Send`, `dex/NewOrder`, `dex/CancelOrder`, `tokens/FreezeMsg`,
/// `tokens/UnfreezeMsg`, `tendermint/PubKeySecp256k1`, `auth/StdTx`).
/// They must match byte for byte.
pub mod type_prefix {
    pub const SEND: [u8; 4] = [0x2A, 0x2C, 0x87, 0xFA];
    pub const NEW_ORDER: [u8; 4] = [0xCE, 0x6D, 0xC0, 0x43];
    pub const CANCEL_ORDER: [u8; 4] = [0x16, 0x6E, 0x68, 0x1B];
    pub const TOKEN_FREEZE: [u8; 4] = [0xE7, 0x74, 0xB3, 0x2D];
    pub const TOKEN_UNFREEZE: [u8; 4] = [0x65, 0x15, 0xFF, 0x0D];
    pub const PUB_KEY: [u8; 4] = [0xEB, 0x5A, 0xE9, 0x87];
    pub const TRANSACTION: [u8; 4] = [0xF0, 0x62, 0x5D, 0xEE];
}

/// Frame `payload` behind `type_prefix`, optionally length-prefixed
pub fn wrap(payload: &[u8], type_prefix: &[u8], with_length_prefix: bool) -> Vec<u8> {
    let contents_len = type_prefix.len() + payload.len();
    let mut buf = Vec::with_capacity(contents_len + if with_length_prefix { 10 } else { 0 });
    if with_length_prefix {
        encode_varint(&mut buf, contents_len as u64);
    }
    buf.extend_from_slice(type_prefix);
    buf.extend_from_slice(payload);
    buf
}

/// Amino encoding of a compressed secp256k1 public key
///
/// `[PUB_KEY prefix][varint 33][key]`
pub fn encode_public_key(public_key: &[u8; 33]) -> Vec<u8> {
    let mut payload = Vec::with_capacity(1 + public_key.len());
    encode_varint(&mut payload, public_key.len() as u64);
    payload.extend_from_slice(public_key);
    wrap(&payload, &type_prefix::PUB_KEY, false)
}
