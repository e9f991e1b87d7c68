//! # Signature Malleability
//!
//! For every ECDSA signature `(r, s)` the pair `(r, n - s)` with the
//! recovery parity flipped recovers the same key. A verifier that accepts
//! both lets an attacker mint a second, byte-different attestation for the
//! same message.
//!
//! ## Expected Defense
//!
//! - High-S signatures are rejected outright (EIP-2)
//! - Out-of-range or corrupted `r`, `s`, `v` never verify
//! - A bad signature cannot be "outvoted" by enough good ones

#[cfg(test)]
mod tests {
    use gm_01_envelope_codec::digest;
    use gm_04_attestation_verifier::{
        recover_address, GuardianSignature, SignatureError, SignedVaa, VerificationError,
    };
    use gm_05_delivery_ledger::DeliveryLedgerApi;
    use gm_06_message_processor::ProcessorError;

    use crate::fixtures::Network;

    /// secp256k1 group order.
    const ORDER: [u8; 32] = [
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFE, 0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36,
        0x41, 0x41,
    ];

    /// `n - s`, big-endian.
    fn negate(s: &[u8; 32]) -> [u8; 32] {
        let mut out = [0u8; 32];
        let mut borrow = 0i16;
        for i in (0..32).rev() {
            let mut diff = ORDER[i] as i16 - s[i] as i16 - borrow;
            borrow = if diff < 0 {
                diff += 256;
                1
            } else {
                0
            };
            out[i] = diff as u8;
        }
        out
    }

    fn malleate(sig: &GuardianSignature) -> GuardianSignature {
        let mut signature = sig.signature;
        signature[32..64].copy_from_slice(&negate(&sig.s()));
        signature[64] ^= 1;
        GuardianSignature {
            index: sig.index,
            signature,
        }
    }

    #[test]
    fn test_high_s_twin_is_rejected() {
        let network = Network::new();
        let envelope = network.inbound(1, b"twin");
        let d = digest(&envelope).unwrap();
        let mut signatures = network.guardians.attest(d, 0, 13).unwrap().signatures;

        let twin = malleate(&signatures[4]);
        assert_eq!(
            recover_address(&d, &twin),
            Err(SignatureError::MalleableSignature)
        );
        signatures[4] = twin;

        let err = network
            .processor
            .receive_vaa(&SignedVaa::new(0, signatures, envelope).unwrap().encode())
            .unwrap_err();
        assert_eq!(
            err,
            ProcessorError::Verification(VerificationError::InvalidSignature { index: 4 })
        );
        assert_eq!(network.deliveries.len().unwrap(), 0);
    }

    #[test]
    fn test_bad_signature_is_not_outvoted() {
        let network = Network::new();
        let envelope = network.inbound(1, b"18 good, 1 bad");
        let d = digest(&envelope).unwrap();
        let mut signatures = network.guardians.attest(d, 0, 19).unwrap().signatures;

        // 18 valid signatures would clear quorum on their own.
        signatures[18].signature[10] ^= 0x01;

        let err = network
            .processor
            .receive_vaa(&SignedVaa::new(0, signatures, envelope).unwrap().encode())
            .unwrap_err();
        assert_eq!(
            err,
            ProcessorError::Verification(VerificationError::InvalidSignature { index: 18 })
        );
    }

    #[test]
    fn test_corrupted_components_never_verify() {
        let network = Network::new();
        let d = digest(&network.inbound(1, b"components")).unwrap();
        let good = network.guardians.sign(&d, 0).unwrap();

        let mut zero_r = good.clone();
        zero_r.signature[..32].fill(0);
        assert_eq!(recover_address(&d, &zero_r), Err(SignatureError::InvalidFormat));

        let mut zero_s = good.clone();
        zero_s.signature[32..64].fill(0);
        assert_eq!(recover_address(&d, &zero_s), Err(SignatureError::InvalidFormat));

        let mut bad_v = good.clone();
        bad_v.signature[64] = 4;
        assert_eq!(
            recover_address(&d, &bad_v),
            Err(SignatureError::InvalidRecoveryId(4))
        );

        // Flipped parity recovers somebody, just not guardian 0.
        let mut flipped = good.clone();
        flipped.signature[64] ^= 1;
        let expected = network.guardians.addresses()[0];
        assert_ne!(recover_address(&d, &flipped).ok(), Some(expected));
        assert_eq!(recover_address(&d, &good), Ok(expected));
    }
}
