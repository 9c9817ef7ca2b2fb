use anchor_lang::prelude::*;

use crate::{constants::*, error::VotingError};

// The Poll account stores everything about one yes/no poll
#[account]
#[derive(InitSpace, Debug, PartialEq)]
pub struct Poll {
    // Unique identifier chosen by the creator (also the PDA seed)
    pub poll_id: u64,

    // Who created this poll (only they can close it)
    pub creator: Pubkey,

    #[max_len(200)]
    pub title: String,

    #[max_len(500)]
    pub description: String,

    pub yes_votes: u32,
    pub no_votes: u32,

    // When this poll was created (Unix timestamp)
    pub created_at: i64,

    // Voting window, both ends inclusive
    pub start_time: i64,
    pub end_time: i64,

    // True iff nft_collection is set
    pub is_nft_gated: bool,

    // Collection a voter's NFT must belong to
    pub nft_collection: Option<Pubkey>,
}

// Voter marker - one per voter per poll.
// The account existing is what blocks a second vote; has_voted is only
// there for clients reading the account.
#[account]
#[derive(InitSpace, Debug, PartialEq)]
pub struct Voter {
    pub poll_id: u64,
    pub has_voted: bool,
}

/// Where a poll sits relative to its voting window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollStatus {
    Pending,
    Active,
    Ended,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollOutcome {
    Passed,
    Rejected,
    Tied,
}

impl Poll {
    /// Account size including the discriminator.
    pub const SPACE: usize = DISCRIMINATOR_SIZE + Poll::INIT_SPACE;

    /// Validates creation inputs and builds a fresh poll with zero tallies.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        poll_id: u64,
        creator: Pubkey,
        title: String,
        description: String,
        start_time: i64,
        end_time: i64,
        nft_collection: Option<Pubkey>,
        created_at: i64,
    ) -> Result<Self> {
        Self::validate_inputs(&title, &description, start_time, end_time)?;

        Ok(Self {
            poll_id,
            creator,
            title,
            description,
            yes_votes: 0,
            no_votes: 0,
            created_at,
            start_time,
            end_time,
            is_nft_gated: nft_collection.is_some(),
            nft_collection,
        })
    }

    /// Title and description limits are UTF-8 byte lengths (`str::len`), the
    /// same unit `#[max_len]` reserves space in. A 200-character title made of
    /// two-byte characters is 400 bytes and is rejected.
    pub fn validate_inputs(
        title: &str,
        description: &str,
        start_time: i64,
        end_time: i64,
    ) -> Result<()> {
        require!(!title.is_empty(), VotingError::TitleEmpty);
        require!(title.len() <= MAX_TITLE_LENGTH, VotingError::TitleTooLong);
        require!(!description.is_empty(), VotingError::DescriptionEmpty);
        require!(
            description.len() <= MAX_DESCRIPTION_LENGTH,
            VotingError::DescriptionTooLong
        );
        require!(start_time < end_time, VotingError::InvalidPollTime);
        Ok(())
    }

    pub fn status(&self, now: i64) -> PollStatus {
        if now < self.start_time {
            PollStatus::Pending
        } else if now > self.end_time {
            PollStatus::Ended
        } else {
            PollStatus::Active
        }
    }

    // Rejects votes outside [start_time, end_time]
    pub fn check_voting_window(&self, now: i64) -> Result<()> {
        match self.status(now) {
            PollStatus::Pending => err!(VotingError::PollNotStarted),
            PollStatus::Ended => err!(VotingError::PollEnded),
            PollStatus::Active => Ok(()),
        }
    }

    /// Tallies after one more vote, without touching the account.
    pub fn tally_after(&self, vote_type: bool) -> Result<(u32, u32)> {
        if vote_type {
            let yes = self
                .yes_votes
                .checked_add(1)
                .ok_or(VotingError::VoteCountOverflow)?;
            Ok((yes, self.no_votes))
        } else {
            let no = self
                .no_votes
                .checked_add(1)
                .ok_or(VotingError::VoteCountOverflow)?;
            Ok((self.yes_votes, no))
        }
    }

    pub fn record_vote(&mut self, vote_type: bool) -> Result<()> {
        let (yes, no) = self.tally_after(vote_type)?;
        self.yes_votes = yes;
        self.no_votes = no;
        Ok(())
    }

    /// Only the creator may close, and only after the window has ended.
    pub fn ensure_closable(&self, signer: &Pubkey, now: i64) -> Result<()> {
        require_keys_eq!(*signer, self.creator, VotingError::Unauthorized);
        match self.status(now) {
            PollStatus::Pending => err!(VotingError::PollStillActive),
            PollStatus::Active => err!(VotingError::PollAlreadyStarted),
            PollStatus::Ended => Ok(()),
        }
    }

    pub fn total_votes(&self) -> u64 {
        u64::from(self.yes_votes) + u64::from(self.no_votes)
    }

    pub fn outcome(&self) -> PollOutcome {
        use std::cmp::Ordering;

        match self.yes_votes.cmp(&self.no_votes) {
            Ordering::Greater => PollOutcome::Passed,
            Ordering::Less => PollOutcome::Rejected,
            Ordering::Equal => PollOutcome::Tied,
        }
    }
}

impl Voter {
    pub const SPACE: usize = DISCRIMINATOR_SIZE + Voter::INIT_SPACE;

    pub fn new(poll_id: u64) -> Self {
        Self {
            poll_id,
            has_voted: true,
        }
    }
}
