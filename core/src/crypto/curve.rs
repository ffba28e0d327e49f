// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

//! # Curve capabilities
//!
//! The signature verifier only needs three operations from the underlying curve library: decoding
//! points, adding public keys, and running the pairing check. [`CurveOps`] names them so that the
//! verifier can be driven by another backend, or by an instrumented one in tests.

use crate::crypto::error::CryptoError;
use crate::crypto::sig::{PublicKey, Signature};
use bls12_381::G1Affine;

/// Operations the signature verifier requires from a pairing-friendly curve.
pub trait CurveOps {
    /// Decoded public key (a point in G1).
    type PublicKey;
    /// Decoded signature (a point in G2).
    type Signature;
    /// Sum of public keys.
    type Aggregate;

    /// Decodes and validates a compressed public key.
    fn decode_public_key(bytes: &[u8]) -> Result<Self::PublicKey, CryptoError>;

    /// Decodes and validates a compressed signature.
    fn decode_signature(bytes: &[u8]) -> Result<Self::Signature, CryptoError>;

    /// Adds the given public keys together.
    fn aggregate_public_keys<'a>(
        pubkeys: impl IntoIterator<Item = &'a Self::PublicKey>,
    ) -> Self::Aggregate
    where
        Self::PublicKey: 'a;

    /// Checks `e(g1, signature) == e(aggregate, H(message))`.
    fn pairing_verify(
        aggregate: &Self::Aggregate,
        message: &[u8],
        signature: &Self::Signature,
    ) -> bool;
}

/// [`CurveOps`] over BLS12-381, backed by the `bls12_381` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bls12381;

impl CurveOps for Bls12381 {
    type PublicKey = PublicKey;
    type Signature = Signature;
    type Aggregate = G1Affine;

    fn decode_public_key(bytes: &[u8]) -> Result<Self::PublicKey, CryptoError> {
        PublicKey::from_bytes(bytes)
    }

    fn decode_signature(bytes: &[u8]) -> Result<Self::Signature, CryptoError> {
        Signature::from_bytes(bytes)
    }

    fn aggregate_public_keys<'a>(
        pubkeys: impl IntoIterator<Item = &'a Self::PublicKey>,
    ) -> Self::Aggregate
    where
        Self::PublicKey: 'a,
    {
        *PublicKey::aggregate(pubkeys).point()
    }

    fn pairing_verify(
        aggregate: &Self::Aggregate,
        message: &[u8],
        signature: &Self::Signature,
    ) -> bool {
        signature.verify(message, aggregate)
    }
}
