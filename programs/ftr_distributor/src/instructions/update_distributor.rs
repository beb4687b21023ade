use anchor_lang::prelude::*;
use crate::state::*;
use crate::event::*;

/**
 * Account context for updating the exchange parameters
 *
 * Access Control: Only the distribution authority; checked by DistributorAccount::update
 */
#[event_cpi]
#[derive(Accounts)]
pub struct UpdateDistributor<'info> {
    /// The distributor account to update
    #[account(mut)]
    pub distributor_account: Account<'info, DistributorAccount>,

    /// Must match the authority stored in the distributor
    pub authority: Signer<'info>,
}

/**
 * Updates the price and/or reward ratio
 *
 * @param ctx - The account context containing distributor and authority accounts
 * @param price_of_contract - New USDC price per contract, or Unchanged
 * @param ftr_per_contract - New FTR per contract, or Unchanged
 *
 * total_contracts is never touched. Outstanding contract tokens are refunded
 * at whatever rate is in effect when they are redeemed.
 */
pub fn handle_update_distributor(
    ctx: Context<UpdateDistributor>,
    price_of_contract: ParamUpdate,
    ftr_per_contract: ParamUpdate,
) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    let distributor = &mut ctx.accounts.distributor_account;

    distributor.update(authority, price_of_contract, ftr_per_contract)?;

    let distributor_key = distributor.key();
    let new_price = distributor.price_of_contract;
    let new_ftr_per_contract = distributor.ftr_per_contract;

    if !price_of_contract.is_unchanged() {
        msg!("Price of contract set to {}", new_price);
    }
    if !ftr_per_contract.is_unchanged() {
        msg!("FTR per contract set to {}", new_ftr_per_contract);
    }

    emit_cpi!(DistributorUpdated {
        distributor: distributor_key,
        authority,
        price_update: price_of_contract,
        ftr_update: ftr_per_contract,
        price_of_contract: new_price,
        ftr_per_contract: new_ftr_per_contract,
    });

    Ok(())
}
