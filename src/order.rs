//! Order Messages
//!
//! The five transaction intents the chain accepts from this signer, as a
//! closed enum. Each variant knows its protobuf layout and amino type prefix.
//!
//! # Supported Types
//!
//! - `NewOrder` - place a limit order (`dex/NewOrder`)
//! - `CancelOrder` - cancel an open order (`dex/CancelOrder`)
//! - `SendOrder` - transfer coins (`cosmos-sdk/Send`)
//! - `TokenFreeze` / `TokenUnfreeze` - lock or unlock a balance (`tokens/FreezeMsg`, `tokens/UnfreezeMsg`)
//!
//! # Example
//!
//! ```ignore
//! use bnb_tx_signer::order::*;
//!
//! let order = Order::from(NewOrder {
//!     sender: key_hash.to_vec(),
//!     id: "B6561DCC104130059A7C08F48C64610C1F6F9064-11".into(),
//!     symbol: "BTC-5C4_BNB".into(),
//!     side: side::BUY,
//!     price: 100_000_000,
//!     quantity: 1_200_000_000,
//!     time_in_force: time_in_force::GOOD_TILL_EXPIRE,
//! });
//! let envelope = order.to_envelope();
//! ```

use crate::amino::{type_prefix, wrap};
use crate::errors::{SignerError, SignerResult};
use crate::protobuf::*;

/// Order side
pub mod side {
    pub const BUY: i64 = 1;
    pub const SELL: i64 = 2;
}

/// Time in force
pub mod time_in_force {
    /// Good till expire
    pub const GOOD_TILL_EXPIRE: i64 = 1;
    /// Immediate or cancel
    pub const IMMEDIATE_OR_CANCEL: i64 = 3;
}

/// Order type
pub mod order_type {
    /// The only order type the chain matches
    pub const LIMIT: i64 = 2;
}

// ============================================================================
// New Order
// ============================================================================

/// Place a limit order
///
/// Price and quantity are fixed-point with 8 decimals (1e8 = 1.0).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewOrder {
    /// Sender key hash (raw bytes, not bech32)
    pub sender: Vec<u8>,
    /// Order id, `<SENDER HEX>-<sequence + 1>`
    pub id: String,
    /// Market symbol, e.g. "BTC-5C4_BNB"
    pub symbol: String,
    /// See [`side`]
    pub side: i64,
    pub price: i64,
    pub quantity: i64,
    /// See [`time_in_force`]
    pub time_in_force: i64,
}

impl NewOrder {
    /// Encode to protobuf bytes
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        encode_bytes(&mut buf, 1, &self.sender);
        encode_string(&mut buf, 2, &self.id);
        encode_string(&mut buf, 3, &self.symbol);
        encode_int64(&mut buf, 4, order_type::LIMIT);
        encode_int64(&mut buf, 5, self.side);
        encode_int64(&mut buf, 6, self.price);
        encode_int64(&mut buf, 7, self.quantity);
        encode_int64(&mut buf, 8, self.time_in_force);
        buf
    }

    /// Decode from protobuf bytes
    ///
    /// Field 4 (order type) is not stored; it is always [`order_type::LIMIT`].
    pub fn decode(bytes: &[u8]) -> SignerResult<Self> {
        let mut order = Self::default();
        for field in FieldReader::new(bytes) {
            let (number, value) = field?;
            match number {
                1 => order.sender = value.as_bytes(number)?.to_vec(),
                2 => order.id = value.as_string(number)?,
                3 => order.symbol = value.as_string(number)?,
                5 => order.side = value.as_int64(number)?,
                6 => order.price = value.as_int64(number)?,
                7 => order.quantity = value.as_int64(number)?,
                8 => order.time_in_force = value.as_int64(number)?,
                _ => {}
            }
        }
        Ok(order)
    }
}

// ============================================================================
// Cancel Order
// ============================================================================

/// Cancel an open order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CancelOrder {
    /// Sender (kept as given; see the preimage rendering)
    pub sender: Vec<u8>,
    pub symbol: String,
    /// Id of the order to cancel
    pub ref_id: String,
}

impl CancelOrder {
    /// Encode to protobuf bytes
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        encode_bytes(&mut buf, 1, &self.sender);
        encode_string(&mut buf, 2, &self.symbol);
        encode_string(&mut buf, 3, &self.ref_id);
        buf
    }

    /// Decode from protobuf bytes
    pub fn decode(bytes: &[u8]) -> SignerResult<Self> {
        let mut order = Self::default();
        for field in FieldReader::new(bytes) {
            let (number, value) = field?;
            match number {
                1 => order.sender = value.as_bytes(number)?.to_vec(),
                2 => order.symbol = value.as_string(number)?,
                3 => order.ref_id = value.as_string(number)?,
                _ => {}
            }
        }
        Ok(order)
    }
}

// ============================================================================
// Send
// ============================================================================

/// Coin amount
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Token {
    /// Denomination (e.g., "BNB")
    pub denom: String,
    /// Amount in 1e-8 units
    pub amount: i64,
}

impl Token {
    /// Create a new token amount
    pub fn new(denom: impl Into<String>, amount: i64) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }

    /// Encode to protobuf bytes
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        encode_string(&mut buf, 1, &self.denom);
        encode_int64(&mut buf, 2, self.amount);
        buf
    }

    /// Decode from protobuf bytes
    pub fn decode(bytes: &[u8]) -> SignerResult<Self> {
        let mut token = Self::default();
        for field in FieldReader::new(bytes) {
            let (number, value) = field?;
            match number {
                1 => token.denom = value.as_string(number)?,
                2 => token.amount = value.as_int64(number)?,
                _ => {}
            }
        }
        Ok(token)
    }
}

/// One side of a transfer: an account and the coins it sends or receives
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SendAccount {
    /// Account key hash (raw bytes, not bech32)
    pub address: Vec<u8>,
    pub coins: Vec<Token>,
}

impl SendAccount {
    /// Create a new transfer side
    pub fn new(address: impl Into<Vec<u8>>, coins: Vec<Token>) -> Self {
        Self {
            address: address.into(),
            coins,
        }
    }

    /// Encode to protobuf bytes
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        encode_bytes(&mut buf, 1, &self.address);
        for coin in &self.coins {
            encode_length_delimited(&mut buf, 2, &coin.encode());
        }
        buf
    }

    /// Decode from protobuf bytes
    pub fn decode(bytes: &[u8]) -> SignerResult<Self> {
        let mut account = Self::default();
        for field in FieldReader::new(bytes) {
            let (number, value) = field?;
            match number {
                1 => account.address = value.as_bytes(number)?.to_vec(),
                2 => account.coins.push(Token::decode(value.as_bytes(number)?)?),
                _ => {}
            }
        }
        Ok(account)
    }
}

/// Transfer coins between accounts
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SendOrder {
    pub inputs: Vec<SendAccount>,
    pub outputs: Vec<SendAccount>,
}

impl SendOrder {
    /// Single input, single output transfer of one coin
    pub fn transfer(
        from: impl Into<Vec<u8>>,
        to: impl Into<Vec<u8>>,
        denom: impl Into<String>,
        amount: i64,
    ) -> Self {
        let token = Token::new(denom, amount);
        Self {
            inputs: vec![SendAccount::new(from, vec![token.clone()])],
            outputs: vec![SendAccount::new(to, vec![token])],
        }
    }

    /// Encode to protobuf bytes
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        for input in &self.inputs {
            encode_length_delimited(&mut buf, 1, &input.encode());
        }
        for output in &self.outputs {
            encode_length_delimited(&mut buf, 2, &output.encode());
        }
        buf
    }

    /// Decode from protobuf bytes
    pub fn decode(bytes: &[u8]) -> SignerResult<Self> {
        let mut order = Self::default();
        for field in FieldReader::new(bytes) {
            let (number, value) = field?;
            match number {
                1 => order.inputs.push(SendAccount::decode(value.as_bytes(number)?)?),
                2 => order.outputs.push(SendAccount::decode(value.as_bytes(number)?)?),
                _ => {}
            }
        }
        Ok(order)
    }
}

// ============================================================================
// Freeze / Unfreeze
// ============================================================================

macro_rules! token_lock_message {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Eq)]
        pub struct $name {
            /// Owner key hash (raw bytes, not bech32)
            pub from: Vec<u8>,
            pub symbol: String,
            pub amount: i64,
        }

        impl $name {
            /// Encode to protobuf bytes
            pub fn encode(&self) -> Vec<u8> {
                let mut buf = Vec::new();
                encode_bytes(&mut buf, 1, &self.from);
                encode_string(&mut buf, 2, &self.symbol);
                encode_int64(&mut buf, 3, self.amount);
                buf
            }

            /// Decode from protobuf bytes
            pub fn decode(bytes: &[u8]) -> SignerResult<Self> {
                let mut msg = Self::default();
                for field in FieldReader::new(bytes) {
                    let (number, value) = field?;
                    match number {
                        1 => msg.from = value.as_bytes(number)?.to_vec(),
                        2 => msg.symbol = value.as_string(number)?,
                        3 => msg.amount = value.as_int64(number)?,
                        _ => {}
                    }
                }
                Ok(msg)
            }
        }
    };
}

token_lock_message!(
    /// Freeze part of a token balance
    TokenFreeze
);

token_lock_message!(
    /// Release a frozen token balance
    TokenUnfreeze
);

// ============================================================================
// Order
// ============================================================================

/// Order variant tag
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OrderKind {
    NewOrder,
    CancelOrder,
    Send,
    TokenFreeze,
    TokenUnfreeze,
}

impl OrderKind {
    pub const ALL: [OrderKind; 5] = [
        OrderKind::NewOrder,
        OrderKind::CancelOrder,
        OrderKind::Send,
        OrderKind::TokenFreeze,
        OrderKind::TokenUnfreeze,
    ];

    /// Amino type prefix of this variant
    pub const fn type_prefix(self) -> [u8; 4] {
        match self {
            OrderKind::NewOrder => type_prefix::NEW_ORDER,
            OrderKind::CancelOrder => type_prefix::CANCEL_ORDER,
            OrderKind::Send => type_prefix::SEND,
            OrderKind::TokenFreeze => type_prefix::TOKEN_FREEZE,
            OrderKind::TokenUnfreeze => type_prefix::TOKEN_UNFREEZE,
        }
    }

    /// Variant for a type prefix, if it is one of ours
    pub fn from_type_prefix(prefix: &[u8]) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.type_prefix().as_slice() == prefix)
    }

    /// Short name for logs
    pub const fn name(self) -> &'static str {
        match self {
            OrderKind::NewOrder => "new_order",
            OrderKind::CancelOrder => "cancel_order",
            OrderKind::Send => "send",
            OrderKind::TokenFreeze => "token_freeze",
            OrderKind::TokenUnfreeze => "token_unfreeze",
        }
    }
}

/// An order to sign
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Order {
    New(NewOrder),
    Cancel(CancelOrder),
    Send(SendOrder),
    Freeze(TokenFreeze),
    Unfreeze(TokenUnfreeze),
}

impl Order {
    pub fn kind(&self) -> OrderKind {
        match self {
            Order::New(_) => OrderKind::NewOrder,
            Order::Cancel(_) => OrderKind::CancelOrder,
            Order::Send(_) => OrderKind::Send,
            Order::Freeze(_) => OrderKind::TokenFreeze,
            Order::Unfreeze(_) => OrderKind::TokenUnfreeze,
        }
    }

    /// Protobuf payload without framing
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Order::New(order) => order.encode(),
            Order::Cancel(order) => order.encode(),
            Order::Send(order) => order.encode(),
            Order::Freeze(order) => order.encode(),
            Order::Unfreeze(order) => order.encode(),
        }
    }

    /// `[type prefix][protobuf payload]`, as placed in a transaction's msgs
    pub fn to_envelope(&self) -> Vec<u8> {
        wrap(&self.encode(), &self.kind().type_prefix(), false)
    }

    /// Parse an order envelope produced by [`Order::to_envelope`]
    pub fn from_envelope(envelope: &[u8]) -> SignerResult<Self> {
        if envelope.len() < 4 {
            return Err(SignerError::invalid_encoding("order envelope shorter than its prefix"));
        }
        let (prefix, payload) = envelope.split_at(4);
        let kind =
            OrderKind::from_type_prefix(prefix).ok_or_else(|| SignerError::UnsupportedOrder {
                message: format!("unknown type prefix {}", hex::encode(prefix)),
            })?;

        Ok(match kind {
            OrderKind::NewOrder => Order::New(NewOrder::decode(payload)?),
            OrderKind::CancelOrder => Order::Cancel(CancelOrder::decode(payload)?),
            OrderKind::Send => Order::Send(SendOrder::decode(payload)?),
            OrderKind::TokenFreeze => Order::Freeze(TokenFreeze::decode(payload)?),
            OrderKind::TokenUnfreeze => Order::Unfreeze(TokenUnfreeze::decode(payload)?),
        })
    }
}

impl From<NewOrder> for Order {
    fn from(order: NewOrder) -> Self {
        Order::New(order)
    }
}

impl From<CancelOrder> for Order {
    fn from(order: CancelOrder) -> Self {
        Order::Cancel(order)
    }
}

impl From<SendOrder> for Order {
    fn from(order: SendOrder) -> Self {
        Order::Send(order)
    }
}

impl From<TokenFreeze> for Order {
    fn from(order: TokenFreeze) -> Self {
        Order::Freeze(order)
    }
}

impl From<TokenUnfreeze> for Order {
    fn from(order: TokenUnfreeze) -> Self {
        Order::Unfreeze(order)
    }
}
