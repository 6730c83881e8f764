//! Chain and signer configuration

use serde::{Deserialize, Serialize};

use crate::address::{MAINNET_HRP, TESTNET_HRP};
use crate::errors::SignerResult;

/// Chain id the signer falls back to when none is configured
pub const DEFAULT_CHAIN_ID: &str = "chain-bnb";

/// 네트워크 구분 (주소 HRP 결정)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl Network {
    /// Bech32 주소 접두사
    pub const fn hrp(self) -> &'static str {
        match self {
            Network::Mainnet => MAINNET_HRP,
            Network::Testnet => TESTNET_HRP,
        }
    }

    /// HRP에서 네트워크 판별
    pub fn from_hrp(hrp: &str) -> Option<Self> {
        match hrp {
            MAINNET_HRP => Some(Network::Mainnet),
            TESTNET_HRP => Some(Network::Testnet),
            _ => None,
        }
    }
}

/// 체인 설정
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainConfig {
    /// 체인 이름
    pub name: &'static str,
    /// 주소 네트워크
    pub network: Network,
    /// 체인 ID
    pub chain_id: &'static str,
}

impl ChainConfig {
    /// 새 체인 설정 생성
    pub const fn new(name: &'static str, network: Network, chain_id: &'static str) -> Self {
        Self {
            name,
            network,
            chain_id,
        }
    }

    /// Bech32 주소 접두사
    pub const fn address_prefix(&self) -> &'static str {
        self.network.hrp()
    }
}

/// BNB Beacon Chain 메인넷
pub const BNB_MAINNET: ChainConfig =
    ChainConfig::new("BNB Beacon Chain Mainnet", Network::Mainnet, "Binance-Chain-Tigris");

/// BNB Beacon Chain 테스트넷
pub const BNB_TESTNET: ChainConfig =
    ChainConfig::new("BNB Beacon Chain Testnet", Network::Testnet, "Binance-Chain-Ganges");

/// 서명 요청 기본값
///
/// Loaded from JSON or built in code; [`crate::SigningRequest::from_config`]
/// copies these values into a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignerConfig {
    chain_id: String,
    network: Network,
    source: i64,
    memo: String,
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SignerConfig {
    /// 기본 설정 생성
    pub fn new() -> Self {
        Self {
            chain_id: DEFAULT_CHAIN_ID.to_string(),
            network: Network::Mainnet,
            source: 0,
            memo: String::new(),
        }
    }

    /// 체인 프리셋에서 설정 생성
    pub fn for_chain(chain: &ChainConfig) -> Self {
        Self::new()
            .with_chain_id(chain.chain_id)
            .with_network(chain.network)
    }

    /// JSON 문자열에서 설정 로드 (누락된 필드는 기본값)
    pub fn from_json_str(json: &str) -> SignerResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// 체인 ID 설정
    pub fn with_chain_id(mut self, chain_id: impl Into<String>) -> Self {
        self.chain_id = chain_id.into();
        self
    }

    /// 네트워크 설정
    pub fn with_network(mut self, network: Network) -> Self {
        self.network = network;
        self
    }

    /// 소스 ID 설정 (공개하지 않으려면 0)
    pub fn with_source(mut self, source: i64) -> Self {
        self.source = source;
        self
    }

    /// 메모 설정
    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    // === Getters ===

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn source(&self) -> i64 {
        self.source
    }

    pub fn memo(&self) -> &str {
        &self.memo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_hrp() {
        assert_eq!(Network::Mainnet.hrp(), "bnb");
        assert_eq!(Network::Testnet.hrp(), "tbnb");
        assert_eq!(Network::from_hrp("tbnb"), Some(Network::Testnet));
        assert_eq!(Network::from_hrp("cosmos"), None);
    }

    #[test]
    fn test_chain_presets() {
        assert_eq!(BNB_MAINNET.address_prefix(), "bnb");
        assert_eq!(BNB_TESTNET.address_prefix(), "tbnb");
        assert_eq!(BNB_MAINNET.chain_id, "Binance-Chain-Tigris");
    }

    #[test]
    fn test_default_config() {
        let config = SignerConfig::default();
        assert_eq!(config.chain_id(), DEFAULT_CHAIN_ID);
        assert_eq!(config.network(), Network::Mainnet);
        assert_eq!(config.source(), 0);
        assert_eq!(config.memo(), "");
    }

    #[test]
    fn test_config_for_chain() {
        let config = SignerConfig::for_chain(&BNB_TESTNET).with_source(1);
        assert_eq!(config.chain_id(), "Binance-Chain-Ganges");
        assert_eq!(config.network(), Network::Testnet);
        assert_eq!(config.source(), 1);
    }

    #[test]
    fn test_config_from_json() {
        let config =
            SignerConfig::from_json_str(r#"{"chain_id":"Binance-Chain-Ganges","network":"testnet","memo":"hi"}"#)
                .unwrap();
        assert_eq!(config.chain_id(), "Binance-Chain-Ganges");
        assert_eq!(config.network(), Network::Testnet);
        assert_eq!(config.memo(), "hi");
        assert_eq!(config.source(), 0);

        assert!(SignerConfig::from_json_str(r#"{"network":"devnet"}"#).is_err());
    }
}
