use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::state::*;
use crate::error::*;
use crate::utils::transfer_token;
use crate::event::*;

/**
 * Account context for buying contract tokens
 *
 * The user pays USDC and FTR into the escrows and receives contract tokens
 * from the contract escrow. All three legs run inside one instruction, so
 * a failure in any of them reverts the others and the supply update.
 *
 * Access Control: Any user holding enough USDC and FTR
 */
#[event_cpi]
#[derive(Accounts)]
pub struct Distribute<'info> {
    /// The distributor account
    /// - Escrows and mints passed below must be the ones recorded here
    /// - Modified to decrease total_contracts
    #[account(
        mut,
        has_one = contract_escrow @ DistributorError::EscrowMismatch,
        has_one = usdc_escrow @ DistributorError::EscrowMismatch,
        has_one = ftr_escrow @ DistributorError::EscrowMismatch,
        has_one = contract_mint @ DistributorError::TokenMintMismatch,
        has_one = usdc_mint @ DistributorError::TokenMintMismatch,
        has_one = ftr_mint @ DistributorError::TokenMintMismatch,
    )]
    pub distributor_account: Box<Account<'info, DistributorAccount>>,

    /// PDA signing the contract-token leg
    /// CHECK: Recomputed from the stored nonce in the handler
    pub escrow_signer: UncheckedAccount<'info>,

    #[account(mut)]
    pub contract_escrow: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub usdc_escrow: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub ftr_escrow: Box<InterfaceAccount<'info, TokenAccount>>,

    pub contract_mint: Box<InterfaceAccount<'info, Mint>>,

    pub usdc_mint: Box<InterfaceAccount<'info, Mint>>,

    pub ftr_mint: Box<InterfaceAccount<'info, Mint>>,

    /// The buyer
    pub user_authority: Signer<'info>,

    /// Buyer's USDC account paying the price
    #[account(
        mut,
        token::mint = usdc_mint,
        token::authority = user_authority,
        token::token_program = token_program,
    )]
    pub user_usdc: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Buyer's FTR account paying the reward ratio
    #[account(
        mut,
        token::mint = ftr_mint,
        token::authority = user_authority,
        token::token_program = token_program,
    )]
    pub user_ftr: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Buyer's contract-token account receiving the purchase
    #[account(
        mut,
        token::mint = contract_mint,
        token::authority = user_authority,
        token::token_program = token_program,
    )]
    pub user_contract: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Token program, pinned to classic SPL Token so every transfer moves the full amount
    #[account(address = anchor_spl::token::ID @ DistributorError::UnsupportedTokenProgram)]
    pub token_program: Interface<'info, TokenInterface>,
}

/**
 * Sells contract tokens at the current price and reward ratio
 *
 * @param ctx - The account context containing all required accounts
 * @param no_of_contracts - Contract tokens requested by the user
 *
 * A shortfall in the user's USDC or FTR is reported by the token program.
 */
pub fn handle_distribute(ctx: Context<Distribute>, no_of_contracts: u64) -> Result<()> {
    let escrow_signer = ctx.accounts.escrow_signer.key();
    let distributor = &mut ctx.accounts.distributor_account;

    // ===== VALIDATION PHASE =====

    distributor.verify_escrow_signer(&escrow_signer, ctx.program_id)?;
    // While the token program would reject this too, we prefer a verbose error.
    require!(
        ctx.accounts.contract_escrow.amount >= no_of_contracts,
        DistributorError::InsufficientSupply
    );

    // ===== EFFECTS PHASE =====

    let quote = distributor.record_distribution(no_of_contracts)?;
    let total_contracts = distributor.total_contracts;
    let distributor_key = distributor.key();

    // ===== INTERACTIONS PHASE =====

    // User's USDC into the USDC escrow
    transfer_token(
        ctx.accounts.user_authority.to_account_info(),
        ctx.accounts.user_usdc.to_account_info(),
        ctx.accounts.usdc_escrow.to_account_info(),
        ctx.accounts.usdc_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        quote.amount_in_usdc,
        ctx.accounts.usdc_mint.decimals,
        None,
    )?;

    // User's FTR into the FTR escrow
    transfer_token(
        ctx.accounts.user_authority.to_account_info(),
        ctx.accounts.user_ftr.to_account_info(),
        ctx.accounts.ftr_escrow.to_account_info(),
        ctx.accounts.ftr_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        quote.amount_in_ftr,
        ctx.accounts.ftr_mint.decimals,
        None,
    )?;

    // Contract tokens out of the escrow, signed by the escrow PDA
    let seeds = ctx.accounts.distributor_account.signer_seeds();
    let signer = &[&seeds[..]];
    transfer_token(
        ctx.accounts.escrow_signer.to_account_info(),
        ctx.accounts.contract_escrow.to_account_info(),
        ctx.accounts.user_contract.to_account_info(),
        ctx.accounts.contract_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        quote.no_of_contracts,
        ctx.accounts.contract_mint.decimals,
        Some(signer),
    )?;

    msg!(
        "Distributed {} contracts for {} usdc and {} ftr, {} left",
        quote.no_of_contracts,
        quote.amount_in_usdc,
        quote.amount_in_ftr,
        total_contracts
    );

    emit_cpi!(ContractsDistributed {
        distributor: distributor_key,
        user: ctx.accounts.user_authority.key(),
        no_of_contracts: quote.no_of_contracts,
        amount_in_usdc: quote.amount_in_usdc,
        amount_in_ftr: quote.amount_in_ftr,
        total_contracts,
    });

    Ok(())
}
