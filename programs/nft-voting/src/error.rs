use anchor_lang::prelude::*;

// Rejection reasons for the voting program.
// The first fourteen variants keep their published order so clients
// decoding custom error codes (6000 + index) see the same numbers.
#[error_code]
pub enum VotingError {
    #[msg("This voter has already voted on this poll")]
    AlreadyVoted,

    #[msg("Unauthorized to close this poll")]
    Unauthorized,

    #[msg("Invalid poll time settings")]
    InvalidPollTime,

    #[msg("Poll ID mismatch")]
    PollMismatch,

    #[msg("Voting is not currently active for this poll")]
    VotingNotActive,

    #[msg("Poll has not started yet")]
    PollNotStarted,

    #[msg("Poll has already ended")]
    PollEnded,

    #[msg("Poll has already started and cannot be closed until it ends")]
    PollAlreadyStarted,

    #[msg("NFT token account is required for NFT-gated polls")]
    MissingNftTokenAccount,

    #[msg("NFT token account owner does not match voter")]
    InvalidNftOwner,

    #[msg("Insufficient NFT balance - at least 1 NFT required")]
    InsufficientNftBalance,

    #[msg("NFT does not belong to the required collection")]
    InvalidNftCollection,

    #[msg("This is an NFT-gated poll, use vote_with_nft instruction")]
    NftGatedPoll,

    #[msg("This poll is not NFT-gated")]
    PollNotNftGated,

    #[msg("A poll with this ID already exists")]
    DuplicatePoll,

    #[msg("Title cannot be empty")]
    TitleEmpty,

    #[msg("Title is too long (maximum 200 bytes)")]
    TitleTooLong,

    #[msg("Description cannot be empty")]
    DescriptionEmpty,

    #[msg("Description is too long (maximum 500 bytes)")]
    DescriptionTooLong,

    #[msg("Cannot close a poll before its voting window has opened and ended")]
    PollStillActive,

    #[msg("Vote count overflow")]
    VoteCountOverflow,
}
