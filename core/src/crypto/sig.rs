// Copyright (c) Yatima, Inc.
// SPDX-License-Identifier: APACHE-2.0

//! # BLS keys and signatures
//!
//! Decoding of compressed sync committee public keys (G1) and aggregate signatures (G2), and their
//! conversion to the limb representation consumed by the proof circuits.

use crate::config::{DST, FIELD_ELEMENT_LEN, PUB_KEY_LEN, SIG_LEN};
use crate::crypto::error::CryptoError;
use crate::crypto::field::LimbArray;
use bls12_381::hash_to_curve::{ExpandMsgXmd, HashToCurve};
use bls12_381::{
    multi_miller_loop, G1Affine, G1Projective, G2Affine, G2Prepared, G2Projective, Gt,
};
use getset::Getters;

/// Limb encoding of a G1 point, `[x, y]`.
pub type G1Limbs = [LimbArray; 2];

/// Limb encoding of a G2 point, `[[x.c0, x.c1], [y.c0, y.c1]]`.
pub type G2Limbs = [[LimbArray; 2]; 2];

/// Computes a hash of the given message to a `G2Projective` point.
///
/// # Arguments
///
/// * `msg` - A byte slice representing the message to be hashed.
///
/// # Returns
///
/// A `G2Projective` point representing the hash of the message.
#[must_use]
pub fn hash(msg: &[u8]) -> G2Projective {
    <G2Projective as HashToCurve<ExpandMsgXmd<sha2::Sha256>>>::hash_to_curve(msg, DST)
}

/// Reads the field element starting at `offset` in an uncompressed point encoding.
fn field_element_at(bytes: &[u8], offset: usize) -> Result<LimbArray, CryptoError> {
    let element: [u8; FIELD_ELEMENT_LEN] = bytes[offset..offset + FIELD_ELEMENT_LEN]
        .try_into()
        .map_err(|_| CryptoError::InvalidLength {
            structure: "FieldElement".into(),
            expected: FIELD_ELEMENT_LEN,
            actual: bytes.len().saturating_sub(offset),
        })?;

    LimbArray::from_field_bytes(&element)
}

/// A structure representing a public key.
///
/// The compressed bytes are kept alongside the decoded `G1Affine` point. Decoding checks that the
/// point is on the curve, in the prime order subgroup and not the identity.
#[derive(Clone, Debug, PartialEq, Eq, Getters)]
pub struct PublicKey {
    #[getset(get = "pub")]
    compressed_pubkey: [u8; PUB_KEY_LEN],
    #[getset(get = "pub")]
    pubkey: G1Affine,
}

impl PublicKey {
    /// Decodes a compressed public key.
    ///
    /// # Arguments
    ///
    /// * `bytes` - The 48 bytes of the compressed point.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `PublicKey` or a `CryptoError` if the bytes are not of the
    /// correct length or do not represent a valid public key.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let compressed_pubkey: [u8; PUB_KEY_LEN] =
            bytes.try_into().map_err(|_| CryptoError::InvalidLength {
                structure: "PublicKey".into(),
                expected: PUB_KEY_LEN,
                actual: bytes.len(),
            })?;

        let pubkey: Option<G1Affine> = G1Affine::from_compressed(&compressed_pubkey).into();
        let pubkey = pubkey
            .filter(|point| !bool::from(point.is_identity()))
            .ok_or_else(|| CryptoError::InvalidPoint {
                structure: "PublicKey".into(),
            })?;

        Ok(Self {
            compressed_pubkey,
            pubkey,
        })
    }

    /// Aggregates public keys by adding their points in G1.
    ///
    /// # Arguments
    ///
    /// * `pubkeys` - The public keys to aggregate.
    ///
    /// # Returns
    ///
    /// The aggregate point. Its compressed form is recomputed from the sum.
    pub fn aggregate<'a>(pubkeys: impl IntoIterator<Item = &'a Self>) -> AggregatePublicKey {
        let sum = pubkeys
            .into_iter()
            .fold(G1Projective::identity(), |acc, pk| acc + pk.pubkey());

        AggregatePublicKey {
            point: G1Affine::from(sum),
        }
    }

    /// Returns the `[x, y]` affine coordinates of the key in limb form.
    pub fn to_limbs(&self) -> Result<G1Limbs, CryptoError> {
        g1_to_limbs(&self.pubkey)
    }
}

/// Sum of several public keys. Unlike a [`PublicKey`] it may be the identity.
#[derive(Clone, Debug, PartialEq, Eq, Getters)]
pub struct AggregatePublicKey {
    #[getset(get = "pub")]
    point: G1Affine,
}

impl AggregatePublicKey {
    /// Compressed encoding of the aggregate point.
    pub fn to_compressed(&self) -> [u8; PUB_KEY_LEN] {
        self.point.to_compressed()
    }
}

fn g1_to_limbs(point: &G1Affine) -> Result<G1Limbs, CryptoError> {
    // Layout: x (48 bytes, flags in the top bits) || y (48 bytes)
    let mut bytes = point.to_uncompressed();
    bytes[0] &= 0x1f;

    Ok([
        field_element_at(&bytes, 0)?,
        field_element_at(&bytes, FIELD_ELEMENT_LEN)?,
    ])
}

/// An aggregate BLS signature, a point in G2.
#[derive(Clone, Debug, PartialEq, Eq, Getters)]
pub struct Signature {
    #[getset(get = "pub")]
    compressed_sig: [u8; SIG_LEN],
    #[getset(get = "pub")]
    sig: G2Affine,
}

impl Signature {
    /// Decodes a compressed signature, checking that it lies in the G2 subgroup.
    ///
    /// # Errors
    ///
    /// Returns a `CryptoError` if the received bytes are not of the correct length (96 bytes) or
    /// do not represent a valid G2 point.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let compressed_sig: [u8; SIG_LEN] =
            bytes.try_into().map_err(|_| CryptoError::InvalidLength {
                structure: "Signature".into(),
                expected: SIG_LEN,
                actual: bytes.len(),
            })?;

        let sig: Option<G2Affine> = G2Affine::from_compressed(&compressed_sig).into();
        let sig = sig.ok_or_else(|| CryptoError::InvalidPoint {
            structure: "Signature".into(),
        })?;

        Ok(Self {
            compressed_sig,
            sig,
        })
    }

    /// Verifies the signature against a given message and public key.
    ///
    /// Checks `e(g1, sig) == e(pk, H(msg))` through a single multi Miller loop.
    ///
    /// # Arguments
    ///
    /// * `msg` - The signed message.
    /// * `pubkey` - The (aggregate) public key point.
    ///
    /// # Returns
    ///
    /// `true` if the signature is valid for the message and key.
    pub fn verify(&self, msg: &[u8], pubkey: &G1Affine) -> bool {
        let msg = G2Prepared::from(G2Affine::from(hash(msg)));
        let g1 = G1Affine::generator();

        let ml_terms = [(&-g1, &G2Prepared::from(self.sig)), (pubkey, &msg)];

        multi_miller_loop(&ml_terms).final_exponentiation() == Gt::identity()
    }

    /// Returns the `[[x.c0, x.c1], [y.c0, y.c1]]` affine coordinates of the signature in limb form.
    pub fn to_limbs(&self) -> Result<G2Limbs, CryptoError> {
        // Layout: x.c1 || x.c0 || y.c1 || y.c0, 48 bytes each, flags in the top bits of x.c1
        let mut bytes = self.sig.to_uncompressed();
        bytes[0] &= 0x1f;

        Ok([
            [
                field_element_at(&bytes, FIELD_ELEMENT_LEN)?,
                field_element_at(&bytes, 0)?,
            ],
            [
                field_element_at(&bytes, 3 * FIELD_ELEMENT_LEN)?,
                field_element_at(&bytes, 2 * FIELD_ELEMENT_LEN)?,
            ],
        ])
    }
}
