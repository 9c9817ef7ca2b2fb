use anchor_lang::prelude::*;
use crate::{
    constants::*,
    events::PollClosed,
    state::{Poll, PollOutcome},
};

// Accounts needed for closing a poll
#[derive(Accounts)]
pub struct ClosePoll<'info> {
    // Must be the poll creator; receives the reclaimed rent
    #[account(mut)]
    pub signer: Signer<'info>,

    // The poll to be closed (account is reclaimed on success)
    #[account(
        mut,
        close = signer,
        seeds = [POLL_SEED, poll.poll_id.to_le_bytes().as_ref()],
        bump
    )]
    pub poll: Account<'info, Poll>,
}

impl<'info> ClosePoll<'info> {
    pub fn close_poll(&mut self) -> Result<()> {
        let current_time = Clock::get()?.unix_timestamp;

        // Creator only, and only once voting is over
        self.poll.ensure_closable(&self.signer.key(), current_time)?;

        msg!("Poll closed successfully!");
        msg!("Poll ID: {}", self.poll.poll_id);
        msg!("Closed by creator: {}", self.signer.key());
        msg!("Closed at: {}", current_time);
        msg!("Final tally: {} yes / {} no", self.poll.yes_votes, self.poll.no_votes);

        match self.poll.outcome() {
            PollOutcome::Passed => msg!("Result: passed"),
            PollOutcome::Rejected => msg!("Result: rejected"),
            PollOutcome::Tied if self.poll.total_votes() == 0 => {
                msg!("No votes were cast on this poll.")
            }
            PollOutcome::Tied => msg!("Result: tied"),
        }

        emit!(PollClosed {
            poll_id: self.poll.poll_id,
            creator: self.poll.creator,
            yes_votes: self.poll.yes_votes,
            no_votes: self.poll.no_votes,
            closed_at: current_time,
        });

        // The account itself is closed by the `close = signer` constraint
        Ok(())
    }
}
