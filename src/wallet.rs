//! Wallet
//!
//! 키 쌍과 체인 설정을 묶어 주문 서명을 간단하게 만드는 고수준 인터페이스입니다.
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! use bnb_tx_signer::{Wallet, BNB_TESTNET};
//!
//! let wallet = Wallet::from_private_key_hex("0x...", &BNB_TESTNET)?;
//! println!("Address: {}", wallet.address());
//!
//! let tx = wallet.sign_order(&order, account_number, sequence)?;
//! ```

use tracing::debug;

use crate::address::Address;
use crate::config::{ChainConfig, SignerConfig};
use crate::errors::SignerResult;
use crate::keys::{parse_private_key, KeyPair};
use crate::order::Order;
use crate::signer::{sign_bytes, verify_signature, Signature, SigningRequest};

/// BNB 지갑
pub struct Wallet {
    /// 키 쌍 (개인키 + 공개키)
    keypair: KeyPair,
    /// 서명 설정 (체인 ID, 네트워크, 소스, 메모)
    config: SignerConfig,
    /// Bech32 주소 (캐시)
    address: String,
}

impl Wallet {
    /// 개인키에서 지갑 생성
    ///
    /// # Arguments
    ///
    /// * `private_key` - 32바이트 개인키
    /// * `config` - 체인 설정
    pub fn from_private_key(private_key: [u8; 32], config: &ChainConfig) -> SignerResult<Self> {
        Self::from_config(private_key, SignerConfig::for_chain(config))
    }

    /// Hex 개인키에서 지갑 생성 (0x 접두사 선택)
    pub fn from_private_key_hex(hex_key: &str, config: &ChainConfig) -> SignerResult<Self> {
        let private_key = parse_private_key(hex_key)?;
        Self::from_private_key(private_key, config)
    }

    /// 서명 설정에서 지갑 생성
    ///
    /// The address prefix follows `config.network()`; chain id, source and
    /// memo pre-fill every [`Wallet::request`].
    pub fn from_config(private_key: [u8; 32], config: SignerConfig) -> SignerResult<Self> {
        let keypair = KeyPair::from_private_key(private_key)?;
        let address = Address::from_public_key(config.network(), &keypair.public_key).encode()?;
        debug!(chain_id = config.chain_id(), %address, "loaded wallet");

        Ok(Self {
            keypair,
            config,
            address,
        })
    }

    /// 지갑 주소 반환
    pub fn address(&self) -> &str {
        &self.address
    }

    /// 주소용 키 해시 (주문의 sender/from 필드에 사용)
    pub fn key_hash(&self) -> [u8; 20] {
        self.keypair.key_hash()
    }

    /// 공개키 반환 (압축, 33바이트)
    pub fn public_key(&self) -> &[u8; 33] {
        &self.keypair.public_key
    }

    /// 공개키 hex 반환
    pub fn public_key_hex(&self) -> String {
        self.keypair.public_key_hex()
    }

    /// 서명 설정 반환
    pub fn config(&self) -> &SignerConfig {
        &self.config
    }

    /// 지갑 설정이 채워진 서명 요청
    pub fn request<'a>(&'a self, order: &'a Order) -> SigningRequest<'a> {
        SigningRequest::from_config(&self.config, order, &self.keypair.private_key)
    }

    /// 주문 서명 후 트랜잭션 바이트 반환
    ///
    /// # Arguments
    ///
    /// * `order` - 서명할 주문
    /// * `account_number` - 계정 번호
    /// * `sequence` - 시퀀스
    pub fn sign_order(
        &self,
        order: &Order,
        account_number: i64,
        sequence: i64,
    ) -> SignerResult<Vec<u8>> {
        self.request(order)
            .with_account_number(account_number)
            .with_sequence(sequence)
            .build()
    }

    /// 바이트 데이터 서명
    pub fn sign_bytes(&self, data: &[u8]) -> SignerResult<Signature> {
        sign_bytes(&self.keypair.private_key, data)
    }

    /// 서명 검증
    pub fn verify(&self, data: &[u8], signature: &Signature) -> SignerResult<bool> {
        verify_signature(&self.keypair.public_key, data, signature)
    }
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address)
            .field("chain_id", &self.config.chain_id())
            .field("network", &self.config.network())
            .field("public_key", &self.public_key_hex())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Network, BNB_MAINNET, BNB_TESTNET};
    use crate::order::TokenFreeze;
    use crate::transaction::StdTx;

    const TEST_KEY: &str = "95949f757db1f57ca94a5dff23314accbe7abee89597bf6a3c7382c84d7eb832";

    #[test]
    fn test_wallet_from_private_key_hex() {
        let wallet = Wallet::from_private_key_hex(TEST_KEY, &BNB_MAINNET).unwrap();
        assert_eq!(wallet.address(), "bnb1grpf0955h0ykzq3ar5nmum7y6gdfl6lxfn46h2");
        assert_eq!(
            wallet.public_key_hex(),
            "026a35920088d98c3888ca68c53dfc93f4564602606cbb87f0fe5ee533db38e502"
        );
        assert_eq!(
            hex::encode(wallet.key_hash()),
            "40c2979694bbc961023d1d27be6fc4d21a9febe6"
        );
    }

    #[test]
    fn test_wallet_testnet_address() {
        let wallet = Wallet::from_private_key_hex(TEST_KEY, &BNB_TESTNET).unwrap();
        assert!(wallet.address().starts_with("tbnb1"));
        assert_eq!(wallet.config().chain_id(), "Binance-Chain-Ganges");
        assert_eq!(wallet.config().network(), Network::Testnet);
    }

    #[test]
    fn test_wallet_from_config_network_selects_prefix() {
        let key = parse_private_key(TEST_KEY).unwrap();
        let config = SignerConfig::from_json_str(r#"{"network":"testnet","memo":"hi"}"#).unwrap();
        let wallet = Wallet::from_config(key, config).unwrap();
        assert!(wallet.address().starts_with("tbnb1"));

        let mainnet = Wallet::from_config(key, SignerConfig::new()).unwrap();
        assert_eq!(mainnet.address(), "bnb1grpf0955h0ykzq3ar5nmum7y6gdfl6lxfn46h2");

        let order = Order::from(TokenFreeze {
            from: wallet.key_hash().to_vec(),
            symbol: "BNB".into(),
            amount: 1,
        });
        let request = wallet.request(&order);
        assert_eq!(request.chain_id, "chain-bnb");
        assert_eq!(request.memo, "hi");
    }

    #[test]
    fn test_wallet_invalid_key() {
        assert!(Wallet::from_private_key([0u8; 32], &BNB_MAINNET).is_err());
        assert!(Wallet::from_private_key_hex("abcd", &BNB_MAINNET).is_err());
    }

    #[test]
    fn test_wallet_request_uses_chain_id() {
        let wallet = Wallet::from_private_key_hex(TEST_KEY, &BNB_TESTNET).unwrap();
        let order = Order::from(TokenFreeze {
            from: wallet.key_hash().to_vec(),
            symbol: "BNB".into(),
            amount: 1,
        });
        let request = wallet.request(&order);
        assert_eq!(request.chain_id, "Binance-Chain-Ganges");
    }

    #[test]
    fn test_wallet_sign_order() {
        let wallet = Wallet::from_private_key_hex(TEST_KEY, &BNB_MAINNET).unwrap();
        let order = Order::from(TokenFreeze {
            from: wallet.key_hash().to_vec(),
            symbol: "BNB".into(),
            amount: 10,
        });
        let tx_bytes = wallet.sign_order(&order, 5, 6).unwrap();
        let expected = wallet
            .request(&order)
            .with_account_number(5)
            .with_sequence(6)
            .build()
            .unwrap();
        assert_eq!(tx_bytes, expected);

        let tx = StdTx::from_envelope(&tx_bytes).unwrap();
        assert_eq!(Order::from_envelope(&tx.msgs[0]).unwrap(), order);
    }

    #[test]
    fn test_wallet_sign_and_verify() {
        let wallet = Wallet::from_private_key_hex(TEST_KEY, &BNB_MAINNET).unwrap();
        let signature = wallet.sign_bytes(b"Hello, BNB!").unwrap();
        assert!(wallet.verify(b"Hello, BNB!", &signature).unwrap());
        assert!(!wallet.verify(b"Tampered", &signature).unwrap());
    }

    #[test]
    fn test_wallet_debug_omits_key() {
        let wallet = Wallet::from_private_key_hex(TEST_KEY, &BNB_MAINNET).unwrap();
        let debug = format!("{wallet:?}");
        assert!(debug.contains("bnb1grpf0955h0ykzq3ar5nmum7y6gdfl6lxfn46h2"));
        assert!(!debug.contains("95949f75"));
    }
}
