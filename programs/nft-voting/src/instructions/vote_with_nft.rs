use anchor_lang::prelude::*;
use anchor_spl::{
    metadata::MetadataAccount,
    token::{Token, TokenAccount},
};
use crate::{
    ballot::{cast_ballot, VoteGate},
    constants::*,
    eligibility::NftHolding,
    instructions::vote::{init_voter_marker, log_vote},
    state::Poll,
};

// Accounts needed for voting on an NFT-gated poll
#[derive(Accounts)]
#[instruction(poll_id: u64)]
pub struct VoteWithNft<'info> {
    // The person voting (must hold an NFT from the poll's collection)
    #[account(mut)]
    pub voter_signer: Signer<'info>,

    #[account(
        mut,
        seeds = [POLL_SEED, poll_id.to_le_bytes().as_ref()],
        bump
    )]
    pub poll: Account<'info, Poll>,

    /// CHECK: voter marker PDA, allocated by the handler. Its existence is
    /// what rejects a second vote
    #[account(
        mut,
        seeds = [VOTER_SEED, poll_id.to_le_bytes().as_ref(), voter_signer.key().as_ref()],
        bump
    )]
    pub voter: UncheckedAccount<'info>,

    // The voter's token account holding the NFT.
    // Ownership, balance and collection are checked by the handler so each
    // failure gets its own error.
    pub nft_token_account: Option<Account<'info, TokenAccount>>,

    // Metaplex metadata of the NFT's mint, for collections verified through
    // metadata rather than a shared collection mint
    pub nft_metadata: Option<Account<'info, MetadataAccount>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

impl<'info> VoteWithNft<'info> {
    pub fn vote_with_nft(
        &mut self,
        poll_id: u64,
        vote_type: bool,
        bumps: &VoteWithNftBumps,
    ) -> Result<()> {
        let current_time = Clock::get()?.unix_timestamp;
        let voter_key = self.voter_signer.key();

        let holding = self
            .nft_token_account
            .as_ref()
            .map(|token| NftHolding::from_accounts(token, self.nft_metadata.as_deref()));

        let payer = self.voter_signer.to_account_info();
        let marker = self.voter.to_account_info();
        let system_program = self.system_program.to_account_info();

        cast_ballot(
            &mut self.poll,
            poll_id,
            &voter_key,
            current_time,
            vote_type,
            VoteGate::Nft(holding.as_ref()),
            || init_voter_marker(&payer, &marker, &system_program, poll_id, bumps.voter),
        )?;

        if let Some(holding) = &holding {
            msg!("Eligible via NFT mint: {}", holding.mint);
        }
        log_vote(&self.poll, voter_key, vote_type, current_time);
        Ok(())
    }
}
