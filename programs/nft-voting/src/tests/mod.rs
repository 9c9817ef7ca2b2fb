//! End-to-end poll scenarios.
//!
//! `Ledger` stands in for the host runtime: accounts live in key-unique maps
//! addressed by the real PDA derivation, each call runs as one transaction
//! that is rolled back on error, and the clock is set by the test.

use std::collections::{hash_map::Entry, HashMap};

use anchor_lang::{
    error::{Error, ErrorCode},
    prelude::*,
};

use crate::{
    ballot::{cast_ballot, VoteGate},
    eligibility::NftHolding,
    error::VotingError,
    pda::{poll_address, voter_address},
    state::{Poll, Voter},
};

const NOW: i64 = 1_700_000_000;

#[derive(Clone, Default)]
struct Ledger {
    now: i64,
    polls: HashMap<Pubkey, Poll>,
    voters: HashMap<Pubkey, Voter>,
}

impl Ledger {
    fn at(now: i64) -> Self {
        Self {
            now,
            ..Self::default()
        }
    }

    fn transact<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let snapshot = self.clone();
        let result = f(self);
        if result.is_err() {
            *self = snapshot;
        }
        result
    }

    #[allow(clippy::too_many_arguments)]
    fn create_poll(
        &mut self,
        creator: &Pubkey,
        poll_id: u64,
        title: &str,
        description: &str,
        start_time: i64,
        end_time: i64,
        nft_collection: Option<Pubkey>,
    ) -> Result<()> {
        self.transact(|ledger| {
            let poll = Poll::new(
                poll_id,
                *creator,
                title.to_string(),
                description.to_string(),
                start_time,
                end_time,
                nft_collection,
                ledger.now,
            )?;
            match ledger.polls.entry(poll_address(poll_id).0) {
                Entry::Occupied(_) => err!(VotingError::DuplicatePoll),
                Entry::Vacant(slot) => {
                    slot.insert(poll);
                    Ok(())
                }
            }
        })
    }

    fn vote(&mut self, signer: &Pubkey, poll_id: u64, vote_type: bool) -> Result<()> {
        self.cast(signer, poll_id, vote_type, VoteGate::Open)
    }

    fn vote_with_nft(
        &mut self,
        signer: &Pubkey,
        poll_id: u64,
        vote_type: bool,
        holding: Option<&NftHolding>,
    ) -> Result<()> {
        self.cast(signer, poll_id, vote_type, VoteGate::Nft(holding))
    }

    fn cast(&mut self, signer: &Pubkey, poll_id: u64, vote_type: bool, gate: VoteGate) -> Result<()> {
        self.transact(|ledger| {
            let now = ledger.now;
            let Ledger { polls, voters, .. } = ledger;
            let poll = polls
                .get_mut(&poll_address(poll_id).0)
                .ok_or(ErrorCode::AccountNotInitialized)?;

            cast_ballot(poll, poll_id, signer, now, vote_type, gate, || {
                match voters.entry(voter_address(poll_id, signer).0) {
                    Entry::Occupied(_) => err!(VotingError::AlreadyVoted),
                    Entry::Vacant(slot) => {
                        slot.insert(Voter::new(poll_id));
                        Ok(())
                    }
                }
            })
        })
    }

    fn close_poll(&mut self, signer: &Pubkey, poll_id: u64) -> Result<()> {
        self.transact(|ledger| {
            let address = poll_address(poll_id).0;
            let poll = ledger
                .polls
                .get(&address)
                .ok_or(ErrorCode::AccountNotInitialized)?;
            poll.ensure_closable(signer, ledger.now)?;
            ledger.polls.remove(&address);
            Ok(())
        })
    }

    fn poll(&self, poll_id: u64) -> Option<&Poll> {
        self.polls.get(&poll_address(poll_id).0)
    }

    fn tally(&self, poll_id: u64) -> (u32, u32) {
        let poll = self.poll(poll_id).expect("poll exists");
        (poll.yes_votes, poll.no_votes)
    }

    fn voter(&self, poll_id: u64, voter: &Pubkey) -> Option<&Voter> {
        self.voters.get(&voter_address(poll_id, voter).0)
    }
}

fn assert_err<T: std::fmt::Debug>(result: Result<T>, expected: impl Into<Error>) {
    assert_eq!(result.unwrap_err(), expected.into());
}

fn nft(owner: Pubkey, amount: u64, collection: Pubkey) -> NftHolding {
    NftHolding {
        owner,
        amount,
        mint: collection,
        collection: Some(collection),
    }
}

fn open_poll(ledger: &mut Ledger, creator: &Pubkey, poll_id: u64, start: i64, end: i64) {
    ledger
        .create_poll(
            creator,
            poll_id,
            "Should we implement feature X?",
            "A poll about implementing feature X",
            start,
            end,
            None,
        )
        .unwrap();
}

#[test]
fn create_poll_records_inputs_verbatim() {
    let mut ledger = Ledger::at(NOW);
    let creator = Pubkey::new_unique();
    open_poll(&mut ledger, &creator, 1, NOW + 2, NOW + 3602);

    let poll = ledger.poll(1).unwrap();
    assert_eq!(poll.title, "Should we implement feature X?");
    assert_eq!(poll.start_time, NOW + 2);
    assert_eq!(poll.end_time, NOW + 3602);
    assert_eq!(poll.created_at, NOW);
    assert_eq!(poll.creator, creator);
    assert_eq!(ledger.tally(1), (0, 0));
}

#[test]
fn invalid_window_creates_nothing() {
    let mut ledger = Ledger::at(NOW);
    let creator = Pubkey::new_unique();

    for (start, end) in [(NOW + 10, NOW + 10), (NOW + 10, NOW + 5)] {
        assert_err(
            ledger.create_poll(&creator, 1, "t", "d", start, end, None),
            VotingError::InvalidPollTime,
        );
    }
    assert!(ledger.poll(1).is_none());
}

#[test]
fn duplicate_poll_id_is_rejected() {
    let mut ledger = Ledger::at(NOW);
    let creator = Pubkey::new_unique();
    open_poll(&mut ledger, &creator, 1, NOW, NOW + 100);
    ledger.vote(&Pubkey::new_unique(), 1, true).unwrap();

    assert_err(
        ledger.create_poll(&Pubkey::new_unique(), 1, "Other", "Other", NOW, NOW + 50, None),
        VotingError::DuplicatePoll,
    );

    let poll = ledger.poll(1).unwrap();
    assert_eq!(poll.creator, creator);
    assert_eq!(poll.end_time, NOW + 100);
    assert_eq!(ledger.tally(1), (1, 0));
}

#[test]
fn open_poll_scenario() {
    let mut ledger = Ledger::at(NOW);
    let creator = Pubkey::new_unique();
    let alice = Pubkey::new_unique();
    let bob = Pubkey::new_unique();
    open_poll(&mut ledger, &creator, 1, NOW + 2, NOW + 3602);

    ledger.now = NOW + 3;
    ledger.vote(&alice, 1, true).unwrap();
    assert_eq!(ledger.tally(1), (1, 0));

    ledger.now = NOW + 6;
    ledger.vote(&bob, 1, false).unwrap();
    assert_eq!(ledger.tally(1), (1, 1));

    assert_err(ledger.close_poll(&creator, 1), VotingError::PollAlreadyStarted);
    assert!(ledger.poll(1).is_some());
}

#[test]
fn votes_outside_window_are_rejected() {
    let mut ledger = Ledger::at(NOW);
    let voter = Pubkey::new_unique();
    open_poll(&mut ledger, &Pubkey::new_unique(), 1, NOW + 10, NOW + 20);

    ledger.now = NOW + 9;
    assert_err(ledger.vote(&voter, 1, true), VotingError::PollNotStarted);

    ledger.now = NOW + 21;
    assert_err(ledger.vote(&voter, 1, true), VotingError::PollEnded);

    assert_eq!(ledger.tally(1), (0, 0));
    assert!(ledger.voter(1, &voter).is_none());
}

#[test]
fn second_vote_is_rejected_without_touching_tally() {
    let mut ledger = Ledger::at(NOW);
    let voter = Pubkey::new_unique();
    open_poll(&mut ledger, &Pubkey::new_unique(), 1, NOW, NOW + 100);

    ledger.vote(&voter, 1, true).unwrap();
    assert_err(ledger.vote(&voter, 1, false), VotingError::AlreadyVoted);
    assert_err(ledger.vote(&voter, 1, true), VotingError::AlreadyVoted);

    assert_eq!(ledger.tally(1), (1, 0));
    let marker = ledger.voter(1, &voter).unwrap();
    assert_eq!(marker.poll_id, 1);
    assert!(marker.has_voted);
}

#[test]
fn one_identity_may_vote_on_many_polls() {
    let mut ledger = Ledger::at(NOW);
    let creator = Pubkey::new_unique();
    let voter = Pubkey::new_unique();
    open_poll(&mut ledger, &creator, 1, NOW, NOW + 100);
    open_poll(&mut ledger, &creator, 2, NOW, NOW + 100);

    ledger.vote(&voter, 1, true).unwrap();
    ledger.vote(&voter, 2, false).unwrap();

    assert_eq!(ledger.tally(1), (1, 0));
    assert_eq!(ledger.tally(2), (0, 1));
}

#[test]
fn vote_on_missing_poll_is_not_found() {
    let mut ledger = Ledger::at(NOW);
    assert_err(
        ledger.vote(&Pubkey::new_unique(), 404, true),
        ErrorCode::AccountNotInitialized,
    );
}

#[test]
fn gated_poll_scenario() {
    let mut ledger = Ledger::at(NOW);
    let creator = Pubkey::new_unique();
    let collection = Pubkey::new_unique();
    let holder = Pubkey::new_unique();
    let empty_handed = Pubkey::new_unique();
    let outsider = Pubkey::new_unique();

    ledger
        .create_poll(
            &creator,
            100,
            "NFT Holders: Which feature next?",
            "Only collection holders may vote",
            NOW + 2,
            NOW + 3602,
            Some(collection),
        )
        .unwrap();
    let poll = ledger.poll(100).unwrap();
    assert!(poll.is_nft_gated);
    assert_eq!(poll.nft_collection, Some(collection));

    ledger.now = NOW + 5;
    ledger
        .vote_with_nft(&holder, 100, true, Some(&nft(holder, 1, collection)))
        .unwrap();
    assert_eq!(ledger.tally(100), (1, 0));

    assert_err(
        ledger.vote_with_nft(&empty_handed, 100, false, Some(&nft(empty_handed, 0, collection))),
        VotingError::InsufficientNftBalance,
    );

    let other_collection = Pubkey::new_unique();
    assert_err(
        ledger.vote_with_nft(&outsider, 100, true, Some(&nft(outsider, 1, other_collection))),
        VotingError::InvalidNftCollection,
    );

    assert_err(
        ledger.vote_with_nft(&holder, 100, false, Some(&nft(holder, 1, collection))),
        VotingError::AlreadyVoted,
    );

    assert_eq!(ledger.tally(100), (1, 0));
    assert!(ledger.voter(100, &empty_handed).is_none());
    assert!(ledger.voter(100, &outsider).is_none());
}

#[test]
fn gated_poll_rejects_borrowed_or_missing_nft() {
    let mut ledger = Ledger::at(NOW);
    let collection = Pubkey::new_unique();
    let owner = Pubkey::new_unique();
    let borrower = Pubkey::new_unique();
    ledger
        .create_poll(&Pubkey::new_unique(), 7, "t", "d", NOW, NOW + 10, Some(collection))
        .unwrap();

    assert_err(
        ledger.vote_with_nft(&borrower, 7, true, Some(&nft(owner, 1, collection))),
        VotingError::InvalidNftOwner,
    );
    assert_err(
        ledger.vote_with_nft(&borrower, 7, true, None),
        VotingError::MissingNftTokenAccount,
    );
    assert_err(ledger.vote(&owner, 7, true), VotingError::NftGatedPoll);

    assert_eq!(ledger.tally(7), (0, 0));
}

#[test]
fn nft_entry_point_refuses_open_polls() {
    let mut ledger = Ledger::at(NOW);
    let voter = Pubkey::new_unique();
    open_poll(&mut ledger, &Pubkey::new_unique(), 3, NOW, NOW + 10);

    assert_err(
        ledger.vote_with_nft(&voter, 3, true, Some(&nft(voter, 1, Pubkey::new_unique()))),
        VotingError::PollNotNftGated,
    );
    assert!(ledger.voter(3, &voter).is_none());
}

#[test]
fn close_rules() {
    let mut ledger = Ledger::at(NOW);
    let creator = Pubkey::new_unique();
    let voter = Pubkey::new_unique();
    open_poll(&mut ledger, &creator, 1, NOW + 10, NOW + 20);

    assert_err(ledger.close_poll(&creator, 1), VotingError::PollStillActive);

    ledger.now = NOW + 15;
    ledger.vote(&voter, 1, true).unwrap();

    ledger.now = NOW + 20;
    assert_err(ledger.close_poll(&creator, 1), VotingError::PollAlreadyStarted);

    ledger.now = NOW + 21;
    assert_err(ledger.close_poll(&voter, 1), VotingError::Unauthorized);
    assert!(ledger.poll(1).is_some());

    ledger.close_poll(&creator, 1).unwrap();
    assert!(ledger.poll(1).is_none());

    // The poll is gone, the proof of participation is not
    assert_err(
        ledger.vote(&Pubkey::new_unique(), 1, true),
        ErrorCode::AccountNotInitialized,
    );
    assert_err(ledger.close_poll(&creator, 1), ErrorCode::AccountNotInitialized);
    assert!(ledger.voter(1, &voter).unwrap().has_voted);
}

#[test]
fn reused_poll_id_keeps_earlier_voter_markers() {
    let mut ledger = Ledger::at(NOW);
    let creator = Pubkey::new_unique();
    let early_voter = Pubkey::new_unique();
    let newcomer = Pubkey::new_unique();
    open_poll(&mut ledger, &creator, 1, NOW, NOW + 10);
    ledger.vote(&early_voter, 1, true).unwrap();

    ledger.now = NOW + 11;
    ledger.close_poll(&creator, 1).unwrap();
    open_poll(&mut ledger, &creator, 1, NOW + 11, NOW + 20);
    assert_eq!(ledger.tally(1), (0, 0));

    assert_err(ledger.vote(&early_voter, 1, false), VotingError::AlreadyVoted);
    ledger.vote(&newcomer, 1, false).unwrap();
    assert_eq!(ledger.tally(1), (0, 1));
}

#[test]
fn failed_vote_rolls_back_everything() {
    let mut ledger = Ledger::at(NOW);
    let voter = Pubkey::new_unique();
    open_poll(&mut ledger, &Pubkey::new_unique(), 1, NOW, NOW + 10);
    ledger.polls.get_mut(&poll_address(1).0).unwrap().yes_votes = u32::MAX;

    assert_err(ledger.vote(&voter, 1, true), VotingError::VoteCountOverflow);
    assert!(ledger.voter(1, &voter).is_none());
    assert_eq!(ledger.tally(1), (u32::MAX, 0));

    // the other side still has room
    ledger.vote(&voter, 1, false).unwrap();
    assert_eq!(ledger.tally(1), (u32::MAX, 1));
}
