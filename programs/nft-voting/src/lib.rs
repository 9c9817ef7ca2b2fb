#![allow(unexpected_cfgs, deprecated)]
#![allow(clippy::result_large_err)]

use anchor_lang::prelude::*;

// Import our modules
pub mod ballot;
pub mod constants;
pub mod eligibility;
pub mod error;
pub mod events;
pub mod instructions;
pub mod pda;
pub mod state;
pub mod utils;

#[cfg(test)]
mod tests;

// Import instruction handlers
use instructions::*;

declare_id!("2jP9HpT3ghFkPqYZbsPqdpmxhEFRJBkY4WzC8F56xpV9");

#[program]
pub mod nft_voting {
    use super::*;

    // Create a yes/no poll with a voting window and an optional NFT collection gate
    #[allow(clippy::too_many_arguments)]
    pub fn create_poll(
        ctx: Context<CreatePoll>,
        poll_id: u64,
        title: String,
        description: String,
        start_time: i64,
        end_time: i64,
        nft_collection: Option<Pubkey>,
    ) -> Result<()> {
        ctx.accounts.create_poll(
            poll_id,
            title,
            description,
            start_time,
            end_time,
            nft_collection,
            &ctx.bumps,
        )
    }

    // Vote on a poll that is not NFT-gated (true = yes)
    pub fn vote(ctx: Context<Vote>, poll_id: u64, vote_type: bool) -> Result<()> {
        ctx.accounts.vote(poll_id, vote_type, &ctx.bumps)
    }

    // Vote on an NFT-gated poll, proving membership with a token account
    pub fn vote_with_nft(ctx: Context<VoteWithNft>, poll_id: u64, vote_type: bool) -> Result<()> {
        ctx.accounts.vote_with_nft(poll_id, vote_type, &ctx.bumps)
    }

    // Close a poll after voting ends (creator only)
    pub fn close_poll(ctx: Context<ClosePoll>) -> Result<()> {
        ctx.accounts.close_poll()
    }
}
