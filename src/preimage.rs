//! Signing Preimage
//!
//! Renders a signing request into the canonical JSON document whose SHA-256
//! digest is signed. The document is never transmitted.
//!
//! ```text
//! {"account_number":"1","chain_id":"chain-bnb","data":null,"memo":"",
//!  "msgs":[{...order...}],"sequence":"10","source":"0"}
//! ```
//!
//! Object keys come out sorted and without whitespace. `account_number`,
//! `sequence` and `source` are decimal strings so they survive JSON readers
//! that parse numbers as doubles.

use serde_json::{json, Value};

use crate::address::Address;
use crate::errors::{SignerError, SignerResult};
use crate::order::{order_type, CancelOrder, NewOrder, Order, SendAccount, SendOrder, Token};
use crate::signer::SigningRequest;

/// Canonical JSON bytes for `request`
pub fn build_preimage(request: &SigningRequest<'_>) -> SignerResult<Vec<u8>> {
    let msg = order_json(request.order)?;
    let document = json!({
        "account_number": request.account_number.to_string(),
        "chain_id": request.chain_id,
        "data": Value::Null,
        "memo": request.memo,
        "msgs": [msg],
        "sequence": request.sequence.to_string(),
        "source": request.source.to_string(),
    });
    Ok(serde_json::to_vec(&document)?)
}

/// JSON rendering of a single order inside `msgs`
pub fn order_json(order: &Order) -> SignerResult<Value> {
    match order {
        Order::New(order) => new_order_json(order),
        Order::Cancel(order) => cancel_order_json(order),
        Order::Send(order) => send_json(order),
        Order::Freeze(order) => token_lock_json(&order.from, &order.symbol, order.amount),
        Order::Unfreeze(order) => token_lock_json(&order.from, &order.symbol, order.amount),
    }
}

/// Key hashes inside the preimage are always mainnet addresses
///
/// A hash that does not encode (empty, too short, too long) renders as `""`
/// and signing goes on.
fn address_string(key_hash: &[u8]) -> String {
    Address::mainnet(key_hash).encode().unwrap_or_default()
}

fn new_order_json(order: &NewOrder) -> SignerResult<Value> {
    let sender = address_string(&order.sender);
    Ok(json!({
        "id": order.id,
        "ordertype": order_type::LIMIT,
        "price": order.price,
        "quantity": order.quantity,
        "sender": sender,
        "side": order.side,
        "symbol": order.symbol,
        "timeinforce": order.time_in_force,
    }))
}

/// The cancel sender is written as-is, not bech32-encoded
fn cancel_order_json(order: &CancelOrder) -> SignerResult<Value> {
    let sender = std::str::from_utf8(&order.sender).map_err(|_| {
        SignerError::invalid_encoding("cancel order sender is not valid UTF-8")
    })?;
    Ok(json!({
        "refid": order.ref_id,
        "sender": sender,
        "symbol": order.symbol,
    }))
}

fn send_json(order: &SendOrder) -> SignerResult<Value> {
    Ok(json!({
        "inputs": accounts_json(&order.inputs),
        "outputs": accounts_json(&order.outputs),
    }))
}

fn accounts_json(accounts: &[SendAccount]) -> Value {
    accounts
        .iter()
        .map(|account| {
            json!({
                "address": address_string(&account.address),
                "coins": tokens_json(&account.coins),
            })
        })
        .collect()
}

fn tokens_json(tokens: &[Token]) -> Value {
    tokens
        .iter()
        .map(|token| {
            json!({
                "denom": token.denom,
                "amount": token.amount,
            })
        })
        .collect()
}

fn token_lock_json(from: &[u8], symbol: &str, amount: i64) -> SignerResult<Value> {
    let from = address_string(from);
    Ok(json!({
        "from": from,
        "symbol": symbol,
        "amount": amount,
    }))
}
