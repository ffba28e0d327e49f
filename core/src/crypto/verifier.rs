// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

//! # Aggregate signature verification
//!
//! Off-chain check that a sync committee signed a signing root before any proof is requested from
//! the prover. A committee with too few participants is rejected before the pairing is computed,
//! a pairing that does not hold is reported through [`VerificationOutcome::ok`].

use crate::config::SYNC_COMMITTEE_SIZE;
use crate::crypto::curve::{Bls12381, CurveOps};
use crate::crypto::error::{CryptoError, VerificationError};
use crate::crypto::field::decode_hex_bytes;
use crate::crypto::hash::HashValue;
use crate::types::bitfield::ParticipationBitfield;
use crate::types::error::ShapeError;
use getset::CopyGetters;
use std::marker::PhantomData;

/// Result of a signature check that went as far as the pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct VerificationOutcome {
    /// Whether the pairing equation holds.
    ok: bool,
    /// Number of committee members that took part in the signature.
    active_count: usize,
}

/// Verifies sync committee aggregate signatures.
///
/// Generic over the [`CurveOps`] backend, [`Bls12381`] by default.
#[derive(Debug, Clone, Copy)]
pub struct SignatureVerifier<C: CurveOps = Bls12381> {
    committee_size: usize,
    _curve: PhantomData<C>,
}

impl SignatureVerifier<Bls12381> {
    /// Verifier for committees of [`SYNC_COMMITTEE_SIZE`] members over BLS12-381.
    pub const fn new() -> Self {
        Self::with_committee_size(SYNC_COMMITTEE_SIZE)
    }
}

impl Default for SignatureVerifier<Bls12381> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: CurveOps> SignatureVerifier<C> {
    /// Verifier for committees of `committee_size` members.
    pub const fn with_committee_size(committee_size: usize) -> Self {
        Self {
            committee_size,
            _curve: PhantomData,
        }
    }

    pub const fn committee_size(&self) -> usize {
        self.committee_size
    }

    /// Participation count that must be strictly exceeded, `floor(2 * n / 3)`.
    pub const fn quorum_threshold(&self) -> usize {
        self.committee_size * 2 / 3
    }

    /// Checks that `active_count` is strictly more than two thirds of the committee.
    ///
    /// # Errors
    ///
    /// Returns a `VerificationError::Quorum` otherwise.
    pub fn check_quorum(&self, active_count: usize) -> Result<(), VerificationError> {
        let threshold = self.quorum_threshold();
        if active_count > threshold {
            Ok(())
        } else {
            Err(VerificationError::Quorum {
                active_count,
                threshold,
            })
        }
    }

    /// Decodes hexadecimal compressed public keys with the curve backend, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns a `CryptoError` on the first key that is not valid hexadecimal or not a valid
    /// point.
    pub fn decode_public_keys<S: AsRef<str>>(
        &self,
        pubkeys: &[S],
    ) -> Result<Vec<C::PublicKey>, CryptoError> {
        pubkeys
            .iter()
            .map(|pubkey| C::decode_public_key(&decode_hex_bytes(pubkey.as_ref())?))
            .collect()
    }

    /// Decodes a hexadecimal compressed signature with the curve backend.
    pub fn decode_signature(&self, signature: &str) -> Result<C::Signature, CryptoError> {
        C::decode_signature(&decode_hex_bytes(signature)?)
    }

    /// Verifies an aggregate signature over a signing root.
    ///
    /// # Arguments
    ///
    /// * `signing_root` - The signed message.
    /// * `pubkeys` - The full, ordered committee.
    /// * `participation` - One bit per committee member, set for signers.
    /// * `signature` - The aggregate signature.
    ///
    /// # Returns
    ///
    /// A `VerificationOutcome` holding the pairing result and the number of signers.
    ///
    /// # Errors
    ///
    /// Returns a `VerificationError::Shape` if the committee is empty, of the wrong size, or does
    /// not match the participation length. Returns a `VerificationError::Quorum` when too few
    /// members signed, in which case no pairing is computed.
    pub fn verify(
        &self,
        signing_root: &HashValue,
        pubkeys: &[C::PublicKey],
        participation: &ParticipationBitfield,
        signature: &C::Signature,
    ) -> Result<VerificationOutcome, VerificationError> {
        if pubkeys.is_empty() {
            return Err(ShapeError::EmptyCommittee.into());
        }
        if pubkeys.len() != self.committee_size {
            return Err(ShapeError::CommitteeSize {
                expected: self.committee_size,
                actual: pubkeys.len(),
            }
            .into());
        }
        if participation.len() != pubkeys.len() {
            return Err(ShapeError::BitfieldLength {
                expected: pubkeys.len(),
                actual: participation.len(),
            }
            .into());
        }

        let active_count = participation.participation_count();
        self.check_quorum(active_count)?;

        let aggregate = C::aggregate_public_keys(participation.select(pubkeys));
        let ok = C::pairing_verify(&aggregate, signing_root.hash(), signature);

        Ok(VerificationOutcome { ok, active_count })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_utils::{aggregate_signature, keypairs};
    use std::cell::Cell;

    thread_local! {
        static PAIRINGS: Cell<usize> = const { Cell::new(0) };
    }

    /// Curve where keys are integers, aggregation is a sum and a signature is valid when it equals
    /// the aggregate. Counts the pairings it is asked for.
    #[derive(Debug, Clone, Copy)]
    struct CountingCurve;

    impl CurveOps for CountingCurve {
        type PublicKey = u64;
        type Signature = u64;
        type Aggregate = u64;

        fn decode_public_key(bytes: &[u8]) -> Result<u64, CryptoError> {
            Ok(bytes.len() as u64)
        }

        fn decode_signature(bytes: &[u8]) -> Result<u64, CryptoError> {
            Ok(bytes.len() as u64)
        }

        fn aggregate_public_keys<'a>(pubkeys: impl IntoIterator<Item = &'a u64>) -> u64 {
            pubkeys.into_iter().sum()
        }

        fn pairing_verify(aggregate: &u64, _message: &[u8], signature: &u64) -> bool {
            PAIRINGS.with(|count| count.set(count.get() + 1));
            aggregate == signature
        }
    }

    fn first_bits_set(total: usize, set: usize) -> ParticipationBitfield {
        ParticipationBitfield::from_bits((0..total).map(|i| i < set).collect())
    }

    fn pairings() -> usize {
        PAIRINGS.with(Cell::get)
    }

    #[test]
    fn test_quorum_boundary_on_full_committee() {
        let verifier = SignatureVerifier::<CountingCurve>::with_committee_size(SYNC_COMMITTEE_SIZE);
        let pubkeys = vec![1u64; SYNC_COMMITTEE_SIZE];
        let root = HashValue::default();
        assert_eq!(verifier.quorum_threshold(), 341);

        let before = pairings();
        let res = verifier.verify(&root, &pubkeys, &first_bits_set(512, 341), &341);
        assert!(matches!(
            res,
            Err(VerificationError::Quorum {
                active_count: 341,
                threshold: 341
            })
        ));
        assert_eq!(pairings(), before);

        let outcome = verifier
            .verify(&root, &pubkeys, &first_bits_set(512, 342), &342)
            .unwrap();
        assert!(outcome.ok());
        assert_eq!(outcome.active_count(), 342);
        assert_eq!(pairings(), before + 1);
    }

    #[test]
    fn test_failed_pairing_is_not_an_error() {
        let verifier = SignatureVerifier::<CountingCurve>::with_committee_size(3);
        let outcome = verifier
            .verify(
                &HashValue::default(),
                &[1, 2, 4],
                &first_bits_set(3, 3),
                &6,
            )
            .unwrap();

        assert!(!outcome.ok());
        assert_eq!(outcome.active_count(), 3);
    }

    #[test]
    fn test_shape_errors() {
        let verifier = SignatureVerifier::<CountingCurve>::with_committee_size(4);
        let root = HashValue::default();

        assert!(matches!(
            verifier.verify(&root, &[], &first_bits_set(0, 0), &0),
            Err(VerificationError::Shape(ShapeError::EmptyCommittee))
        ));
        assert!(matches!(
            verifier.verify(&root, &[1, 1, 1], &first_bits_set(3, 3), &3),
            Err(VerificationError::Shape(ShapeError::CommitteeSize {
                expected: 4,
                actual: 3
            }))
        ));
        assert!(matches!(
            verifier.verify(&root, &[1, 1, 1, 1], &first_bits_set(8, 4), &4),
            Err(VerificationError::Shape(ShapeError::BitfieldLength {
                expected: 4,
                actual: 8
            }))
        ));
    }

    #[test]
    fn test_decoding_goes_through_curve() {
        let verifier = SignatureVerifier::<CountingCurve>::with_committee_size(2);

        assert_eq!(
            verifier.decode_public_keys(&["0x0102", "aabbcc"]).unwrap(),
            vec![2, 3]
        );
        assert_eq!(verifier.decode_signature("0x01020304").unwrap(), 4);
        assert!(matches!(
            verifier.decode_public_keys(&["0x0102", "0x123"]),
            Err(CryptoError::InvalidHexadecimal { .. })
        ));
    }

    #[test]
    fn test_bls_committee_of_four() {
        let pairs = keypairs(4);
        let signing_root = HashValue::new([0x42; 32]);
        let signers = pairs[..3].iter().map(|(sk, _)| *sk).collect::<Vec<_>>();
        let signature = aggregate_signature(&signers, signing_root.hash());

        let verifier = SignatureVerifier::<Bls12381>::with_committee_size(4);
        let encoded = pairs
            .iter()
            .map(|(_, pk)| format!("0x{}", hex::encode(pk.compressed_pubkey())))
            .collect::<Vec<_>>();
        let pubkeys = verifier.decode_public_keys(&encoded).unwrap();
        assert_eq!(pubkeys[3], pairs[3].1);
        let signature = verifier
            .decode_signature(&hex::encode(signature.compressed_sig()))
            .unwrap();
        assert_eq!(verifier.quorum_threshold(), 2);

        let participation = ParticipationBitfield::from_bits(vec![true, true, true, false]);
        let outcome = verifier
            .verify(&signing_root, &pubkeys, &participation, &signature)
            .unwrap();
        assert_eq!(
            outcome,
            VerificationOutcome {
                ok: true,
                active_count: 3
            }
        );

        // Altered message
        let mut altered = *signing_root.hash();
        altered[31] ^= 1;
        let outcome = verifier
            .verify(&HashValue::new(altered), &pubkeys, &participation, &signature)
            .unwrap();
        assert!(!outcome.ok());

        // Same number of signers, different subset
        let participation = ParticipationBitfield::from_bits(vec![false, true, true, true]);
        let outcome = verifier
            .verify(&signing_root, &pubkeys, &participation, &signature)
            .unwrap();
        assert!(!outcome.ok());

        // Not enough signers
        let participation = ParticipationBitfield::from_bits(vec![true, false, false, false]);
        assert!(matches!(
            verifier.verify(&signing_root, &pubkeys, &participation, &signature),
            Err(VerificationError::Quorum {
                active_count: 1,
                threshold: 2
            })
        ));
    }
}
