use anchor_lang::prelude::*;

declare_id!("5CZmHUkQTnp3pX28LD6hy4McMM9gbzn154S9w7cGAsoR");

pub mod constants;
pub mod error;
pub mod event;
pub mod instructions;
pub mod state;
pub mod utils;


use instructions::*;
use state::ParamUpdate;

/**
 * FTR Distributor Program
 *
 * An escrow-backed exchange between a creator-supplied contract token, USDC
 * and the FTR reward token, at a fixed price and reward ratio.
 *
 * Key Features:
 * - Fixed price (USDC per contract) and reward ratio (FTR per contract)
 * - Authority-gated parameter updates with explicit Unchanged/SetTo arguments
 * - Buy (distribute) and sell back (redeem) at the current rate
 * - Every instruction moves all of its token legs or none of them
 * - Classic SPL Token mints only, so transfers always move the quoted amount
 *
 * Architecture:
 * - Distributor account: keypair account holding the exchange parameters
 * - Escrow signer PDA: derived from [ftr_mint, signer_nonce], owns the escrows
 * - Contract, USDC and FTR escrows: token accounts owned by the escrow signer
 *
 * Workflow:
 * 1. Authority initializes the distributor and deposits the contract supply
 * 2. Authority adjusts price or reward ratio when needed
 * 3. Users distribute (pay USDC + FTR, receive contracts) and redeem (the reverse)
 * 4. Authority withdraws collected funds or unsold contracts
 */
#[program]
pub mod ftr_distributor {
    use super::*;

    /**
     * Initializes a distributor
     *
     * Records the exchange parameters and escrow addresses, then moves
     * `no_of_contracts` contract tokens from the creator into the contract escrow.
     *
     * @param ctx - Account context containing distributor, escrows, mints and creator accounts
     * @param price_of_contract - USDC base units per contract token
     * @param ftr_per_contract - FTR base units per contract token
     * @param no_of_contracts - Initial contract supply
     * @param signer_nonce - Bump of the escrow signer PDA derived from the FTR mint
     *
     * Access Control: Signing creator becomes the authority
     */
    pub fn initialize_distributor(
        ctx: Context<InitializeDistributor>,
        price_of_contract: u64,
        ftr_per_contract: u64,
        no_of_contracts: u64,
        signer_nonce: u8,
    ) -> Result<()> {
        handle_initialize_distributor(
            ctx,
            price_of_contract,
            ftr_per_contract,
            no_of_contracts,
            signer_nonce,
        )
    }

    /**
     * Updates the price and/or reward ratio
     *
     * @param ctx - Account context containing distributor and authority accounts
     * @param price_of_contract - New price, or Unchanged
     * @param ftr_per_contract - New reward ratio, or Unchanged
     *
     * Access Control: Authority only
     */
    pub fn update_distributor(
        ctx: Context<UpdateDistributor>,
        price_of_contract: ParamUpdate,
        ftr_per_contract: ParamUpdate,
    ) -> Result<()> {
        handle_update_distributor(ctx, price_of_contract, ftr_per_contract)
    }

    /**
     * Pays USDC and FTR for contract tokens
     *
     * @param ctx - Account context containing distributor, escrows and user accounts
     * @param no_of_contracts - Contract tokens to buy
     *
     * Access Control: Any user
     */
    pub fn distribute(ctx: Context<Distribute>, no_of_contracts: u64) -> Result<()> {
        handle_distribute(ctx, no_of_contracts)
    }

    /**
     * Returns contract tokens for a USDC and FTR refund at the current rate
     *
     * @param ctx - Account context containing distributor, escrows and user accounts
     * @param no_of_contracts - Contract tokens to return
     *
     * Access Control: Any user
     */
    pub fn redeem(ctx: Context<Redeem>, no_of_contracts: u64) -> Result<()> {
        handle_redeem(ctx, no_of_contracts)
    }

    /**
     * Withdraws escrowed funds to the authority
     *
     * @param ctx - Account context containing distributor, escrows and authority accounts
     * @param no_of_contracts - Contract tokens to withdraw, if any
     * @param amount_of_usdc - USDC to withdraw, if any
     * @param amount_of_ftr - FTR to withdraw, if any
     *
     * Access Control: Authority only
     */
    pub fn withdraw(
        ctx: Context<Withdraw>,
        no_of_contracts: Option<u64>,
        amount_of_usdc: Option<u64>,
        amount_of_ftr: Option<u64>,
    ) -> Result<()> {
        handle_withdraw(ctx, no_of_contracts, amount_of_usdc, amount_of_ftr)
    }
}
