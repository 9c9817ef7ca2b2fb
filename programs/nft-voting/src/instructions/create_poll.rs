use anchor_lang::prelude::*;
use crate::{
    constants::*,
    error::VotingError,
    events::PollCreated,
    pda::poll_id_seed,
    state::Poll,
    utils::{create_derived_account, ensure_vacant, write_account},
};

// Accounts needed for creating a new poll
#[derive(Accounts)]
#[instruction(poll_id: u64)]
pub struct CreatePoll<'info> {
    // The person creating the poll (pays for the poll account)
    #[account(mut)]
    pub creator: Signer<'info>,

    /// CHECK: address is pinned by the seeds; the handler allocates it so an
    /// existing poll is reported as `DuplicatePoll`
    #[account(
        mut,
        seeds = [POLL_SEED, poll_id.to_le_bytes().as_ref()],
        bump
    )]
    pub poll: UncheckedAccount<'info>,

    // Required system program for account creation
    pub system_program: Program<'info, System>,
}

impl<'info> CreatePoll<'info> {
    #[allow(clippy::too_many_arguments)]
    pub fn create_poll(
        &mut self,
        poll_id: u64,
        title: String,
        description: String,
        start_time: i64,
        end_time: i64,
        nft_collection: Option<Pubkey>,
        bumps: &CreatePollBumps,
    ) -> Result<()> {
        let current_time = Clock::get()?.unix_timestamp;

        // Validates title, description and window before anything is allocated
        let poll = Poll::new(
            poll_id,
            self.creator.key(),
            title,
            description,
            start_time,
            end_time,
            nft_collection,
            current_time,
        )?;

        ensure_vacant(&self.poll, &crate::ID, VotingError::DuplicatePoll)?;

        let id_seed = poll_id_seed(poll_id);
        let signer_seeds: &[&[u8]] = &[POLL_SEED, &id_seed, &[bumps.poll]];

        create_derived_account(
            &self.creator.to_account_info(),
            &self.poll.to_account_info(),
            &self.system_program.to_account_info(),
            signer_seeds,
            Poll::SPACE,
            &crate::ID,
        )?;
        write_account(&self.poll, &poll)?;

        msg!("Poll created successfully!");
        msg!("Poll ID: {}", poll_id);
        msg!("Creator: {}", self.creator.key());
        msg!("Voting window: {} - {}", start_time, end_time);
        if let Some(collection) = nft_collection {
            msg!("NFT-gated by collection: {}", collection);
        }

        emit!(PollCreated {
            poll: self.poll.key(),
            poll_id,
            creator: self.creator.key(),
            start_time,
            end_time,
            nft_collection,
        });

        Ok(())
    }
}
