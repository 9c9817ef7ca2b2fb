use anchor_lang::prelude::*;
use crate::{
    ballot::{cast_ballot, VoteGate},
    constants::*,
    error::VotingError,
    events::VoteCast,
    pda::poll_id_seed,
    state::{Poll, Voter},
    utils::{create_derived_account, ensure_vacant, write_account},
};

// Accounts needed for voting on an open (not NFT-gated) poll
#[derive(Accounts)]
#[instruction(poll_id: u64)]
pub struct Vote<'info> {
    // The person voting (pays for the voter marker)
    #[account(mut)]
    pub voter_signer: Signer<'info>,

    // The poll being voted on (tally is modified)
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

    pub system_program: Program<'info, System>,
}

impl<'info> Vote<'info> {
    pub fn vote(&mut self, poll_id: u64, vote_type: bool, bumps: &VoteBumps) -> Result<()> {
        let current_time = Clock::get()?.unix_timestamp;
        let voter_key = self.voter_signer.key();

        let payer = self.voter_signer.to_account_info();
        let marker = self.voter.to_account_info();
        let system_program = self.system_program.to_account_info();

        cast_ballot(
            &mut self.poll,
            poll_id,
            &voter_key,
            current_time,
            vote_type,
            VoteGate::Open,
            || init_voter_marker(&payer, &marker, &system_program, poll_id, bumps.voter),
        )?;

        log_vote(&self.poll, voter_key, vote_type, current_time);
        Ok(())
    }
}

/// Creates the voter marker for `payer` on `poll_id`, or fails with
/// `AlreadyVoted` if it is already there.
pub(crate) fn init_voter_marker<'info>(
    payer: &AccountInfo<'info>,
    marker: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    poll_id: u64,
    bump: u8,
) -> Result<()> {
    ensure_vacant(marker, &crate::ID, VotingError::AlreadyVoted)?;

    let id_seed = poll_id_seed(poll_id);
    let payer_key = payer.key();
    let signer_seeds: &[&[u8]] = &[VOTER_SEED, &id_seed, payer_key.as_ref(), &[bump]];

    create_derived_account(
        payer,
        marker,
        system_program,
        signer_seeds,
        Voter::SPACE,
        &crate::ID,
    )?;
    write_account(marker, &Voter::new(poll_id))
}

pub(crate) fn log_vote(poll: &Poll, voter: Pubkey, vote_type: bool, timestamp: i64) {
    msg!("Vote cast successfully!");
    msg!("Voter: {}", voter);
    msg!("Poll ID: {}", poll.poll_id);
    msg!("Choice: {}", if vote_type { "yes" } else { "no" });
    msg!("Tally: {} yes / {} no", poll.yes_votes, poll.no_votes);

    emit!(VoteCast {
        poll_id: poll.poll_id,
        voter,
        vote_type,
        yes_votes: poll.yes_votes,
        no_votes: poll.no_votes,
        timestamp,
    });
}
