//! # Messenger Configuration
//!
//! Runtime parameters with sane defaults and `GM_*` environment overrides.
//!
//! ## Security Requirements
//!
//! - `owner_secret` MUST NOT be the default zero value
//! - The local emitter address MUST be set and canonical for the local chain

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use gm_03_emitter_registry::OwnerCredential;
use gm_04_attestation_verifier::{ExpiryPolicy, DEFAULT_GUARDIAN_SET_TTL_SECS};
use shared_types::{ChainId, EmitterKey, UniversalAddress};
use thiserror::Error;

/// Consistency level asking guardians to wait for confirmation.
pub const CONSISTENCY_CONFIRMED: u8 = 0;

/// Consistency level asking guardians to wait for finality.
pub const CONSISTENCY_FINALIZED: u8 = 1;

/// Messenger configuration.
#[derive(Debug, Clone)]
pub struct MessengerConfig {
    /// Chain this messenger runs on.
    pub local_chain: ChainId,
    /// Local emitter address.
    pub emitter_address: UniversalAddress,
    /// Registry owner secret. MUST NOT be zero.
    pub owner_secret: OwnerCredential,
    /// Consistency level stamped on outbound envelopes.
    pub consistency_level: u8,
    /// Nonce stamped on outbound envelopes.
    pub nonce: u32,
    /// Grace window for a guardian set after rotation.
    pub guardian_set_ttl_secs: u64,
    /// What to do with attestations under an expired guardian set.
    pub expiry_policy: ExpiryPolicy,
    /// How long to wait for an attestation before reporting "not yet".
    pub attestation_timeout: Duration,
    /// Delay between attestation polls.
    pub poll_interval: Duration,
    /// Directory for file-backed ledgers. In-memory when unset.
    pub data_dir: Option<PathBuf>,
}

impl Default for MessengerConfig {
    fn default() -> Self {
        Self {
            local_chain: ChainId::SOLANA,
            emitter_address: UniversalAddress::ZERO,
            owner_secret: OwnerCredential::new([0u8; 32]), // MUST be overridden
            consistency_level: CONSISTENCY_CONFIRMED,
            nonce: 0,
            guardian_set_ttl_secs: DEFAULT_GUARDIAN_SET_TTL_SECS,
            expiry_policy: ExpiryPolicy::Strict,
            attestation_timeout: Duration::from_secs(60),
            poll_interval: Duration::from_secs(1),
            data_dir: None,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable could not be parsed.
    #[error("Invalid value for {var}: {value:?} ({reason})")]
    InvalidValue {
        /// Variable name
        var: &'static str,
        /// Raw value
        value: String,
        /// What was expected
        reason: String,
    },

    /// Owner secret is the default zero value.
    #[error("SECURITY VIOLATION: owner secret is the zero value. Set GM_OWNER_SECRET.")]
    InsecureOwnerSecret,

    /// Local chain is 0.
    #[error("Local chain is unset. Set GM_LOCAL_CHAIN.")]
    UnsetLocalChain,

    /// Local emitter address is zero.
    #[error("Emitter address is zero. Set GM_EMITTER_ADDRESS.")]
    ZeroEmitterAddress,

    /// Emitter address carries padding the local chain forbids.
    #[error("Emitter address {address} is not canonical for {chain}")]
    NonCanonicalEmitter {
        /// Local chain
        chain: ChainId,
        /// Configured address
        address: UniversalAddress,
    },

    /// Poll interval is not shorter than the attestation timeout.
    #[error("Poll interval {interval:?} must be shorter than timeout {timeout:?}")]
    PollIntervalTooLong {
        /// Poll interval
        interval: Duration,
        /// Attestation timeout
        timeout: Duration,
    },
}

impl MessengerConfig {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `GM_LOCAL_CHAIN`: Local chain id (default: 1)
    /// - `GM_EMITTER_ADDRESS`: Hex address, native width or 32 bytes
    /// - `GM_OWNER_SECRET`: Hex, 32 bytes
    /// - `GM_CONSISTENCY_LEVEL`: Outbound consistency level (default: 0)
    /// - `GM_NONCE`: Outbound nonce (default: 0)
    /// - `GM_GUARDIAN_SET_TTL_SECS`: Rotation grace window (default: 86400)
    /// - `GM_EXPIRY_POLICY`: `strict` or `attested-before-expiry` (default: strict)
    /// - `GM_ATTESTATION_TIMEOUT_SECS`: Poll timeout (default: 60)
    /// - `GM_POLL_INTERVAL_MS`: Poll interval (default: 1000)
    /// - `GM_DATA_DIR`: Ledger directory (default: in-memory)
    ///
    /// The result is not validated; call [`validate`](Self::validate).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup("GM_LOCAL_CHAIN") {
            config.local_chain = ChainId(parse_number("GM_LOCAL_CHAIN", &value)?);
        }
        if let Some(value) = lookup("GM_EMITTER_ADDRESS") {
            config.emitter_address = parse_address(config.local_chain, &value)?;
        }
        if let Some(value) = lookup("GM_OWNER_SECRET") {
            config.owner_secret =
                OwnerCredential::from_hex(&value).ok_or_else(|| ConfigError::InvalidValue {
                    var: "GM_OWNER_SECRET",
                    value: "<redacted>".into(),
                    reason: "expected 32 hex-encoded bytes".into(),
                })?;
        }
        if let Some(value) = lookup("GM_CONSISTENCY_LEVEL") {
            config.consistency_level = parse_number("GM_CONSISTENCY_LEVEL", &value)?;
        }
        if let Some(value) = lookup("GM_NONCE") {
            config.nonce = parse_number("GM_NONCE", &value)?;
        }
        if let Some(value) = lookup("GM_GUARDIAN_SET_TTL_SECS") {
            config.guardian_set_ttl_secs = parse_number("GM_GUARDIAN_SET_TTL_SECS", &value)?;
        }
        if let Some(value) = lookup("GM_EXPIRY_POLICY") {
            config.expiry_policy =
                value
                    .parse::<ExpiryPolicy>()
                    .map_err(|reason| ConfigError::InvalidValue {
                        var: "GM_EXPIRY_POLICY",
                        value: value.clone(),
                        reason,
                    })?;
        }
        if let Some(value) = lookup("GM_ATTESTATION_TIMEOUT_SECS") {
            config.attestation_timeout =
                Duration::from_secs(parse_number("GM_ATTESTATION_TIMEOUT_SECS", &value)?);
        }
        if let Some(value) = lookup("GM_POLL_INTERVAL_MS") {
            config.poll_interval =
                Duration::from_millis(parse_number("GM_POLL_INTERVAL_MS", &value)?);
        }
        if let Some(value) = lookup("GM_DATA_DIR") {
            config.data_dir = Some(PathBuf::from(value));
        }

        Ok(config)
    }

    /// Validate configuration for production readiness.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.owner_secret.is_zero() {
            return Err(ConfigError::InsecureOwnerSecret);
        }
        if self.local_chain.is_unset() {
            return Err(ConfigError::UnsetLocalChain);
        }
        if self.emitter_address.is_zero() {
            return Err(ConfigError::ZeroEmitterAddress);
        }
        if !self.emitter_address.is_canonical_for(self.local_chain) {
            return Err(ConfigError::NonCanonicalEmitter {
                chain: self.local_chain,
                address: self.emitter_address,
            });
        }
        if self.poll_interval >= self.attestation_timeout {
            return Err(ConfigError::PollIntervalTooLong {
                interval: self.poll_interval,
                timeout: self.attestation_timeout,
            });
        }
        Ok(())
    }

    /// Identity of the local emitter.
    pub fn local_emitter(&self) -> EmitterKey {
        EmitterKey::new(self.local_chain, self.emitter_address)
    }
}

fn parse_number<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        var,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn parse_address(chain: ChainId, value: &str) -> Result<UniversalAddress, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidValue {
        var: "GM_EMITTER_ADDRESS",
        value: value.to_string(),
        reason,
    };
    let trimmed = value.trim();
    let bytes = hex::decode(trimmed.strip_prefix("0x").unwrap_or(trimmed))
        .map_err(|e| invalid(e.to_string()))?;

    if bytes.len() == 32 {
        let mut raw = [0u8; 32];
        raw.copy_from_slice(&bytes);
        return Ok(UniversalAddress(raw));
    }
    UniversalAddress::from_native(chain, &bytes).map_err(|e| invalid(e.to_string()))
}
