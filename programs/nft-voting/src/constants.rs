// PDA Seeds for deterministic address generation

// Seed for Poll PDAs: ["poll", poll_id (u64 little-endian)]
// Poll ids are global, so two creators can never hold the same id
pub const POLL_SEED: &[u8] = b"poll";

// Seed for Voter PDAs: ["voter", poll_id (u64 little-endian), voter.key()]
// One voter marker per identity per poll
pub const VOTER_SEED: &[u8] = b"voter";

// Maximum values for validation.
// These are UTF-8 byte lengths, not character counts: they must equal the
// #[max_len] reserved for Poll.title and Poll.description.
pub const MAX_TITLE_LENGTH: usize = 200; // bytes
pub const MAX_DESCRIPTION_LENGTH: usize = 500; // bytes

// Smallest token balance that proves membership in a collection
pub const MIN_NFT_BALANCE: u64 = 1;

// Anchor discriminator size (8 bytes)
pub const DISCRIMINATOR_SIZE: usize = 8;
