use anchor_lang::prelude::*;

use crate::error::DistributorError;

/// Finds the escrow signer PDA and its nonce for an FTR mint
///
/// Off-chain callers use this to pick the nonce passed to initialize_distributor
/// and the owner of the three escrow token accounts.
pub fn find_escrow_signer(ftr_mint: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[ftr_mint.as_ref()], program_id)
}

/// Rebuilds the escrow signer address from a stored nonce
pub fn escrow_signer_address(
    ftr_mint: &Pubkey,
    signer_nonce: u8,
    program_id: &Pubkey,
) -> Result<Pubkey> {
    Pubkey::create_program_address(&[ftr_mint.as_ref(), &[signer_nonce]], program_id)
        .map_err(|_| error!(DistributorError::AddressDerivationMismatch))
}

/// Fails with AddressDerivationMismatch unless `presented` is the signer
/// derived from `ftr_mint` and `signer_nonce`
pub fn verify_escrow_signer(
    ftr_mint: &Pubkey,
    signer_nonce: u8,
    program_id: &Pubkey,
    presented: &Pubkey,
) -> Result<()> {
    let expected = escrow_signer_address(ftr_mint, signer_nonce, program_id)?;
    require_keys_eq!(
        *presented,
        expected,
        DistributorError::AddressDerivationMismatch
    );
    Ok(())
}
