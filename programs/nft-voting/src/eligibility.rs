//! NFT eligibility checks for gated polls.
//!
//! Nothing here is cached: every gated vote re-reads the token account (and
//! optional Metaplex metadata) supplied with the transaction.

use anchor_lang::prelude::*;
use anchor_spl::{
    metadata::{mpl_token_metadata::types::Collection, MetadataAccount},
    token::TokenAccount,
};

use crate::{constants::MIN_NFT_BALANCE, error::VotingError};

/// The parts of a token holding that decide eligibility.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NftHolding {
    pub owner: Pubkey,
    pub amount: u64,
    pub mint: Pubkey,
    /// Collection the mint belongs to, if it could be established.
    pub collection: Option<Pubkey>,
}

impl NftHolding {
    /// Builds a holding from a token account and, optionally, the metadata
    /// account of its mint.
    pub fn from_accounts(token: &TokenAccount, metadata: Option<&MetadataAccount>) -> Self {
        Self::from_token(
            token,
            metadata.map(|metadata| (&metadata.mint, metadata.collection.as_ref())),
        )
    }

    /// `metadata` is the metadata mint and its collection field.
    ///
    /// Without metadata the mint itself is the collection reference (a plain
    /// SPL collection mint). With metadata, only a verified Metaplex
    /// collection on metadata describing this same mint counts.
    pub fn from_token(
        token: &TokenAccount,
        metadata: Option<(&Pubkey, Option<&Collection>)>,
    ) -> Self {
        let collection = match metadata {
            None => Some(token.mint),
            Some((metadata_mint, collection)) => {
                verified_collection(&token.mint, metadata_mint, collection)
            }
        };

        Self {
            owner: token.owner,
            amount: token.amount,
            mint: token.mint,
            collection,
        }
    }
}

// Collection key from metadata, only if the metadata is for `token_mint`
// and the collection has been verified by its authority.
pub fn verified_collection(
    token_mint: &Pubkey,
    metadata_mint: &Pubkey,
    collection: Option<&Collection>,
) -> Option<Pubkey> {
    if metadata_mint != token_mint {
        return None;
    }
    collection.filter(|c| c.verified).map(|c| c.key)
}

/// Checks, in order: ownership, balance, collection membership.
pub fn verify_nft_holding(
    holding: Option<&NftHolding>,
    signer: &Pubkey,
    required_collection: &Pubkey,
) -> Result<()> {
    let holding = holding.ok_or(VotingError::MissingNftTokenAccount)?;

    require_keys_eq!(holding.owner, *signer, VotingError::InvalidNftOwner);
    require!(
        holding.amount >= MIN_NFT_BALANCE,
        VotingError::InsufficientNftBalance
    );
    require!(
        holding.collection == Some(*required_collection),
        VotingError::InvalidNftCollection
    );

    Ok(())
}
