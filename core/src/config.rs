// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

//! # Protocol parameters
//!
//! All the constants that the proof circuits and the on-chain light client depend upon. They are
//! gathered here so that a change in one of them is visible in a single place.

/// Number of validators in a sync committee.
pub const SYNC_COMMITTEE_SIZE: usize = 512;

/// Bit width of a single limb in the circuit representation of a field element.
pub const LIMB_BITS: usize = 55;

/// Number of limbs used to represent one BLS12-381 base field element. `55 * 7 = 385` bits covers
/// the 381-bit modulus.
pub const LIMB_COUNT: usize = 7;

/// Total capacity in bits of a limb array.
pub const LIMB_CAPACITY_BITS: usize = LIMB_BITS * LIMB_COUNT;

/// Length of a compressed G1 public key in bytes.
pub const PUB_KEY_LEN: usize = 48;

/// Length of a compressed G2 signature in bytes.
pub const SIG_LEN: usize = 96;

/// Length of a big-endian encoded BLS12-381 base field element.
pub const FIELD_ELEMENT_LEN: usize = 48;

/// Length of a fork version.
pub const FORK_VERSION_LEN: usize = 4;

/// Length of a domain type.
pub const DOMAIN_TYPE_LEN: usize = 4;

/// Domain type for sync committee signatures.
///
/// From [the Altair specifications](https://github.com/ethereum/consensus-specs/blob/dev/specs/altair/beacon-chain.md#domain-types).
pub const DOMAIN_SYNC_COMMITTEE: [u8; DOMAIN_TYPE_LEN] = [7, 0, 0, 0];

/// BLS DST for hashing to G2, proof-of-possession scheme.
pub const DST: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_POP_";

pub const SLOTS_PER_EPOCH: u64 = 32;

pub const EPOCHS_PER_SYNC_COMMITTEE_PERIOD: u64 = 256;

pub const SLOTS_PER_SYNC_COMMITTEE_PERIOD: u64 = SLOTS_PER_EPOCH * EPOCHS_PER_SYNC_COMMITTEE_PERIOD;

/// Number of slots between a finalized slot and the slot attesting its finality (two epochs).
pub const FINALITY_DELAY_SLOTS: u64 = 2 * SLOTS_PER_EPOCH;

/// Generalized index of `finalized_checkpoint.root` in a Bellatrix `BeaconState`.
pub const FINALIZED_ROOT_GENERALIZED_INDEX: u64 = 105;

/// Number of siblings in a finality branch.
pub const FINALITY_BRANCH_NBR_SIBLINGS: usize = 6;

/// Generalized index of `next_sync_committee` in a Bellatrix `BeaconState`.
pub const NEXT_SYNC_COMMITTEE_GENERALIZED_INDEX: u64 = 55;

/// Number of siblings in a next sync committee branch.
pub const SYNC_COMMITTEE_BRANCH_NBR_SIBLINGS: usize = 5;

/// Generalized index of `execution_payload.state_root` in a Bellatrix `BeaconBlockBody`.
pub const EXECUTION_STATE_ROOT_GENERALIZED_INDEX: u64 = 402;

/// Generalized index of `execution_payload.block_number` in a Bellatrix `BeaconBlockBody`.
pub const EXECUTION_BLOCK_NUMBER_GENERALIZED_INDEX: u64 = 406;

/// Number of siblings in an execution payload field branch.
pub const EXECUTION_BRANCH_NBR_SIBLINGS: usize = 8;

/// Index of the Poseidon commitment in the public signals of the committee commitment circuit.
pub const SYNC_COMMITTEE_COMMITMENT_SIGNAL_INDEX: usize = 32;

/// Name of the circuit proving a BLS signature over a header.
pub const HEADER_CIRCUIT: &str = "blsHeaderVerify";

/// Name of the circuit committing to a sync committee.
pub const COMMITTEE_CIRCUIT: &str = "ssz2Poseidon";

#[cfg(test)]
mod test {
    use super::*;
    use crate::merkle::utils::generalized_index_depth;

    #[test]
    fn test_branch_depths_match_indices() {
        assert_eq!(
            generalized_index_depth(FINALIZED_ROOT_GENERALIZED_INDEX),
            FINALITY_BRANCH_NBR_SIBLINGS
        );
        assert_eq!(
            generalized_index_depth(NEXT_SYNC_COMMITTEE_GENERALIZED_INDEX),
            SYNC_COMMITTEE_BRANCH_NBR_SIBLINGS
        );
        assert_eq!(
            generalized_index_depth(EXECUTION_STATE_ROOT_GENERALIZED_INDEX),
            EXECUTION_BRANCH_NBR_SIBLINGS
        );
        assert_eq!(
            generalized_index_depth(EXECUTION_BLOCK_NUMBER_GENERALIZED_INDEX),
            EXECUTION_BRANCH_NBR_SIBLINGS
        );
    }

    #[test]
    fn test_limb_capacity_covers_field() {
        assert!(LIMB_CAPACITY_BITS >= 381);
        assert_eq!(SLOTS_PER_SYNC_COMMITTEE_PERIOD, 8192);
    }
}
