use anchor_lang::{
    prelude::*,
    system_program::{
        allocate, assign, create_account, transfer, Allocate, Assign, CreateAccount, Transfer,
    },
};

use crate::error::VotingError;

// An account at a derived address counts as taken once this program owns it
// and it holds data. Closed accounts go back to the system program with no
// data, so their address is free again.
pub fn is_initialized(account: &AccountInfo, program_id: &Pubkey) -> bool {
    account.owner == program_id && !account.data_is_empty()
}

/// Fails with `taken` when the derived address already holds one of our
/// accounts. This is the only guard against duplicate polls and double votes.
pub fn ensure_vacant(
    account: &AccountInfo,
    program_id: &Pubkey,
    taken: VotingError,
) -> Result<()> {
    if is_initialized(account, program_id) {
        return Err(taken.into());
    }
    Ok(())
}

/// Allocates `space` bytes at a PDA and hands it to `owner`, with `payer`
/// covering rent.
///
/// Addresses that already hold lamports (someone sent SOL to the PDA ahead
/// of time) are topped up, allocated and assigned instead of created.
pub fn create_derived_account<'info>(
    payer: &AccountInfo<'info>,
    target: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    signer_seeds: &[&[u8]],
    space: usize,
    owner: &Pubkey,
) -> Result<()> {
    let required_lamports = Rent::get()?.minimum_balance(space);
    let current_lamports = target.lamports();
    let signer: &[&[&[u8]]] = &[signer_seeds];

    if current_lamports == 0 {
        return create_account(
            CpiContext::new_with_signer(
                system_program.clone(),
                CreateAccount {
                    from: payer.clone(),
                    to: target.clone(),
                },
                signer,
            ),
            required_lamports,
            space as u64,
            owner,
        );
    }

    let top_up = required_lamports.saturating_sub(current_lamports);
    if top_up > 0 {
        transfer(
            CpiContext::new(
                system_program.clone(),
                Transfer {
                    from: payer.clone(),
                    to: target.clone(),
                },
            ),
            top_up,
        )?;
    }

    allocate(
        CpiContext::new_with_signer(
            system_program.clone(),
            Allocate {
                account_to_allocate: target.clone(),
            },
            signer,
        ),
        space as u64,
    )?;

    assign(
        CpiContext::new_with_signer(
            system_program.clone(),
            Assign {
                account_to_assign: target.clone(),
            },
            signer,
        ),
        owner,
    )
}

/// Writes an Anchor account (discriminator + Borsh body) into freshly
/// allocated account data.
pub fn write_account<T: AccountSerialize>(target: &AccountInfo, value: &T) -> Result<()> {
    let mut data = target.try_borrow_mut_data()?;
    let mut writer: &mut [u8] = &mut data;
    value.try_serialize(&mut writer)
}
