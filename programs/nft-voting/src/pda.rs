//! Address derivation for poll and voter accounts.
//!
//! Accounts are never looked up through an index: a client that knows the
//! `poll_id` (and its own key) recomputes the address with the same seeds the
//! program checks in its `seeds = [...]` constraints. The byte encoding here is
//! part of the wire contract. `poll_id` is always 8 bytes little-endian.

use anchor_lang::prelude::*;

use crate::constants::{POLL_SEED, VOTER_SEED};

/// Seed bytes for a poll id.
pub fn poll_id_seed(poll_id: u64) -> [u8; 8] {
    poll_id.to_le_bytes()
}

/// Derives a program address from a namespace tag and its key fields.
///
/// Returns the address and the canonical bump that disambiguates it from an
/// on-curve key.
pub fn derive_address(namespace: &[u8], fields: &[&[u8]]) -> (Pubkey, u8) {
    let mut seeds: Vec<&[u8]> = Vec::with_capacity(fields.len() + 1);
    seeds.push(namespace);
    seeds.extend_from_slice(fields);
    Pubkey::find_program_address(&seeds, &crate::ID)
}

/// Address of the poll with the given id: `["poll", poll_id]`.
pub fn poll_address(poll_id: u64) -> (Pubkey, u8) {
    derive_address(POLL_SEED, &[&poll_id_seed(poll_id)])
}

/// Address of the marker proving `voter` voted on `poll_id`:
/// `["voter", poll_id, voter]`.
pub fn voter_address(poll_id: u64, voter: &Pubkey) -> (Pubkey, u8) {
    derive_address(VOTER_SEED, &[&poll_id_seed(poll_id), voter.as_ref()])
}
