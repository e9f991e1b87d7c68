//! # ECDSA Recovery (secp256k1)
//!
//! Recovers the Ethereum-style address that produced a guardian signature.
//!
//! ## Security Notes
//!
//! - **Malleability Prevention (EIP-2)**: S must not exceed the half order
//! - **Scalar Range Validation**: R and S must be in [1, n-1]
//! - **Constant-Time Operations**: range checks and address comparison use `subtle`

use gm_01_envelope_codec::keccak256;
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use shared_types::{Address, Hash};
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

use super::entities::GuardianSignature;
use super::errors::SignatureError;

/// secp256k1 curve order n
const SECP256K1_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

/// n/2, the largest S that is still "low".
const SECP256K1_HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B, 0x20, 0xA0,
];

/// Recover the signer address of `signature` over `digest`.
pub fn recover_address(
    digest: &Hash,
    signature: &GuardianSignature,
) -> Result<Address, SignatureError> {
    let r = signature.r();
    let s = signature.s();

    if !is_valid_scalar(&r) || !is_valid_scalar(&s) {
        return Err(SignatureError::InvalidFormat);
    }
    if !is_low_s(&s) {
        return Err(SignatureError::MalleableSignature);
    }

    let recovery_id = parse_recovery_id(signature.v())?;

    let mut sig_bytes = [0u8; 64];
    sig_bytes.copy_from_slice(&signature.signature[..64]);
    let sig = Signature::from_slice(&sig_bytes);
    sig_bytes.zeroize();
    let sig = sig.map_err(|_| SignatureError::InvalidFormat)?;

    let recovered_key = VerifyingKey::recover_from_prehash(digest, &sig, recovery_id)
        .map_err(|_| SignatureError::RecoveryFailed)?;

    Ok(address_from_pubkey(&recovered_key))
}

/// Whether `signature` over `digest` was produced by `expected`.
///
/// The address comparison is constant time.
pub fn signed_by(digest: &Hash, signature: &GuardianSignature, expected: &Address) -> bool {
    match recover_address(digest, signature) {
        Ok(recovered) => bool::from(recovered.ct_eq(expected)),
        Err(_) => false,
    }
}

/// Derive Ethereum address from public key: last 20 bytes of
/// `keccak256(x || y)`.
pub fn address_from_pubkey(public_key: &VerifyingKey) -> Address {
    let pubkey_bytes = public_key.to_encoded_point(false);
    let hash = keccak256(&pubkey_bytes.as_bytes()[1..]);

    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

/// Constant-time `a < b` over big-endian 32-byte integers.
fn ct_less_than(a: &[u8; 32], b: &[u8; 32]) -> Choice {
    let mut less = Choice::from(0u8);
    let mut greater = Choice::from(0u8);

    for i in 0..32 {
        let not_decided = !(less | greater);
        less |= not_decided & Choice::from((a[i] < b[i]) as u8);
        greater |= not_decided & Choice::from((a[i] > b[i]) as u8);
    }

    less
}

/// EIP-2: S at most n/2 (n is odd, so n/2 rounds down and is still low).
pub(crate) fn is_low_s(s: &[u8; 32]) -> bool {
    let below = ct_less_than(s, &SECP256K1_HALF_ORDER);
    let equal = s.ct_eq(&SECP256K1_HALF_ORDER);
    (below | equal).into()
}

/// Scalar in [1, n-1].
fn is_valid_scalar(scalar: &[u8; 32]) -> bool {
    let is_zero = scalar.ct_eq(&[0u8; 32]);
    (!is_zero & ct_less_than(scalar, &SECP256K1_ORDER)).into()
}

/// Valid v values: 0, 1, 27, 28
fn parse_recovery_id(v: u8) -> Result<RecoveryId, SignatureError> {
    let id = match v {
        0 | 27 => 0,
        1 | 28 => 1,
        _ => return Err(SignatureError::InvalidRecoveryId(v)),
    };

    RecoveryId::try_from(id).map_err(|_| SignatureError::InvalidRecoveryId(v))
}

/// s' = n - s
pub(crate) fn invert_s(s: &[u8; 32]) -> [u8; 32] {
    let mut result = [0u8; 32];
    let mut borrow: i32 = 0;

    for i in (0..32).rev() {
        let diff = (SECP256K1_ORDER[i] as i32) - (s[i] as i32) - borrow;
        if diff < 0 {
            result[i] = (diff + 256) as u8;
            borrow = 1;
        } else {
            result[i] = diff as u8;
            borrow = 0;
        }
    }

    result
}
