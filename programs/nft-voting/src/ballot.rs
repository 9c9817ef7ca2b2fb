//! Vote admission pipeline shared by `vote` and `vote_with_nft`.

use anchor_lang::prelude::*;

use crate::{
    eligibility::{verify_nft_holding, NftHolding},
    error::VotingError,
    state::Poll,
};

/// Which entry point the vote came through.
#[derive(Clone, Copy, Debug)]
pub enum VoteGate<'a> {
    /// `vote`: only polls without an NFT requirement.
    Open,
    /// `vote_with_nft`: the holding supplied with the transaction, if any.
    Nft(Option<&'a NftHolding>),
}

/// Every check that must pass before a voter marker may be created.
pub fn admit(
    poll: &Poll,
    poll_id: u64,
    signer: &Pubkey,
    now: i64,
    gate: VoteGate,
) -> Result<()> {
    require_eq!(poll.poll_id, poll_id, VotingError::PollMismatch);
    poll.check_voting_window(now)?;

    match gate {
        VoteGate::Open => {
            require!(!poll.is_nft_gated, VotingError::NftGatedPoll);
        }
        VoteGate::Nft(holding) => {
            require!(poll.is_nft_gated, VotingError::PollNotNftGated);
            let collection = poll
                .nft_collection
                .ok_or(VotingError::PollNotNftGated)?;
            verify_nft_holding(holding, signer, &collection)?;
        }
    }

    Ok(())
}

/// Admits the vote, creates the voter marker and bumps the tally.
///
/// `create_marker` must fail with `AlreadyVoted` when the marker already
/// exists. The tally is only written once the marker has been created, and
/// the new counts are computed before that so an overflow never leaves a
/// marker behind.
pub fn cast_ballot<F>(
    poll: &mut Poll,
    poll_id: u64,
    signer: &Pubkey,
    now: i64,
    vote_type: bool,
    gate: VoteGate,
    create_marker: F,
) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    admit(poll, poll_id, signer, now, gate)?;
    let (yes_votes, no_votes) = poll.tally_after(vote_type)?;

    create_marker()?;

    poll.yes_votes = yes_votes;
    poll.no_votes = no_votes;
    Ok(())
}
