//! # Attestation Polling
//!
//! Bounded wait for a quorum attestation. When the timeout elapses the
//! caller is told "not yet available"; that is an outcome, not a failure.
//! Dropping the future at any point leaves every ledger untouched, since
//! polling only reads from the oracle.

use std::time::Duration;

use gm_04_attestation_verifier::SignedVaa;
use gm_telemetry::ATTESTATION_POLLS;
use shared_types::MessageKey;
use tokio::time::{sleep, timeout, Instant};
use tracing::{debug, info, warn};

use crate::config::MessengerConfig;
use crate::domain::OracleError;
use crate::ports::AttestationOracle;

/// Result of a bounded poll.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PollOutcome {
    /// A quorum attestation arrived in time.
    Attested(SignedVaa),
    /// The timeout elapsed first.
    NotYetAvailable {
        /// Fetches made
        attempts: u32,
        /// Time spent waiting
        waited: Duration,
    },
}

impl PollOutcome {
    /// The attested VAA, if any.
    pub fn into_vaa(self) -> Option<SignedVaa> {
        match self {
            PollOutcome::Attested(vaa) => Some(vaa),
            PollOutcome::NotYetAvailable { .. } => None,
        }
    }
}

/// Polls an oracle at a fixed interval until a timeout.
#[derive(Debug)]
pub struct AttestationPoller<O: AttestationOracle> {
    oracle: O,
    interval: Duration,
    timeout: Duration,
}

impl<O: AttestationOracle> AttestationPoller<O> {
    /// Create a poller.
    pub fn new(oracle: O, interval: Duration, timeout: Duration) -> Self {
        Self {
            oracle,
            interval,
            timeout,
        }
    }

    /// Poller using the configured interval and timeout.
    pub fn from_config(oracle: O, config: &MessengerConfig) -> Self {
        Self::new(oracle, config.poll_interval, config.attestation_timeout)
    }

    /// Wait for the attestation of `key`.
    ///
    /// Oracle errors end the poll immediately.
    pub async fn poll(&self, key: &MessageKey) -> Result<PollOutcome, OracleError> {
        let started = Instant::now();
        let mut attempts = 0u32;

        let result = timeout(self.timeout, self.fetch_until_attested(key, &mut attempts)).await;

        match result {
            Ok(Ok(vaa)) => {
                ATTESTATION_POLLS.with_label_values(&["attested"]).inc();
                info!(
                    "[gm-06] Attestation for {} after {} polls ({} signatures)",
                    key,
                    attempts,
                    vaa.signatures.len()
                );
                Ok(PollOutcome::Attested(vaa))
            }
            Ok(Err(e)) => {
                ATTESTATION_POLLS.with_label_values(&["error"]).inc();
                warn!("[gm-06] Attestation poll for {} failed: {}", key, e);
                Err(e)
            }
            Err(_) => {
                ATTESTATION_POLLS
                    .with_label_values(&["not_yet_available"])
                    .inc();
                let waited = started.elapsed();
                warn!(
                    "[gm-06] Attestation for {} not available after {:?} ({} polls)",
                    key, waited, attempts
                );
                Ok(PollOutcome::NotYetAvailable { attempts, waited })
            }
        }
    }

    async fn fetch_until_attested(
        &self,
        key: &MessageKey,
        attempts: &mut u32,
    ) -> Result<SignedVaa, OracleError> {
        loop {
            *attempts += 1;
            if let Some(bytes) = self.oracle.fetch(key).await? {
                return Ok(SignedVaa::parse(&bytes)?);
            }
            debug!("[gm-06] {} not attested yet (poll {})", key, attempts);
            sleep(self.interval).await;
        }
    }
}
