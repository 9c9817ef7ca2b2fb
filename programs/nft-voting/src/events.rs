use anchor_lang::prelude::*;

// Events let an off-chain indexer list polls and follow tallies without
// scanning every account.

#[event]
pub struct PollCreated {
    pub poll: Pubkey,
    pub poll_id: u64,
    pub creator: Pubkey,
    pub start_time: i64,
    pub end_time: i64,
    pub nft_collection: Option<Pubkey>,
}

#[event]
pub struct VoteCast {
    pub poll_id: u64,
    pub voter: Pubkey,
    /// true = yes
    pub vote_type: bool,
    pub yes_votes: u32,
    pub no_votes: u32,
    pub timestamp: i64,
}

#[event]
pub struct PollClosed {
    pub poll_id: u64,
    pub creator: Pubkey,
    pub yes_votes: u32,
    pub no_votes: u32,
    pub closed_at: i64,
}
