//! # Quorum Verification
//!
//! Structural checks run first (cheap, deterministic). Every signature is
//! then recovered in parallel and the full result vector is inspected before
//! any outcome is returned.

use rayon::prelude::*;
use shared_types::Hash;

use super::ecdsa::signed_by;
use super::entities::{GuardianSet, GuardianSignature};
use super::errors::VerificationError;

/// Verify `signatures` over `digest` against `set`.
///
/// Returns the number of distinct valid signatures, which is at least the
/// set's quorum.
///
/// ## Errors
///
/// - `OutOfRangeSigner` / `DuplicateSigner`: first offending index in order
/// - `InvalidSignature`: lowest position whose signature does not recover to
///   the guardian at its index
/// - `QuorumNotMet`: all signatures valid but too few of them
pub fn verify_signatures(
    digest: &Hash,
    signatures: &[GuardianSignature],
    set: &GuardianSet,
) -> Result<usize, VerificationError> {
    let set_size = set.len();

    let mut seen = [false; 256];
    for sig in signatures {
        let index = sig.index as usize;
        if index >= set_size {
            return Err(VerificationError::OutOfRangeSigner {
                index: sig.index,
                set_size,
            });
        }
        if seen[index] {
            return Err(VerificationError::DuplicateSigner { index: sig.index });
        }
        seen[index] = true;
    }

    let results: Vec<bool> = signatures
        .par_iter()
        .map(|sig| signed_by(digest, sig, &set.keys[sig.index as usize]))
        .collect();

    let valid = results.iter().filter(|ok| **ok).count();
    if let Some(position) = results.iter().position(|ok| !ok) {
        return Err(VerificationError::InvalidSignature {
            index: signatures[position].index,
        });
    }

    let required = set.quorum();
    if valid < required {
        return Err(VerificationError::QuorumNotMet {
            valid,
            required,
            set_size,
        });
    }

    Ok(valid)
}
