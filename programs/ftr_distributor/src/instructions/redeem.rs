use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::state::*;
use crate::error::*;
use crate::utils::transfer_token;
use crate::event::*;

/**
 * Account context for returning contract tokens
 *
 * The user sends contract tokens back to the contract escrow and is refunded
 * USDC and FTR from the other two escrows at the current rate.
 *
 * Access Control: Any user holding contract tokens
 */
#[event_cpi]
#[derive(Accounts)]
pub struct Redeem<'info> {
    /// The distributor account
    /// - Modified to increase total_contracts
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

    /// PDA signing the refund legs
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

    /// The seller
    pub user_authority: Signer<'info>,

    /// User's USDC account receiving the refund
    #[account(
        mut,
        token::mint = usdc_mint,
        token::authority = user_authority,
        token::token_program = token_program,
    )]
    pub user_usdc: Box<InterfaceAccount<'info, TokenAccount>>,

    /// User's FTR account receiving the refund
    #[account(
        mut,
        token::mint = ftr_mint,
        token::authority = user_authority,
        token::token_program = token_program,
    )]
    pub user_ftr: Box<InterfaceAccount<'info, TokenAccount>>,

    /// User's contract-token account returning the tokens
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
 * Buys contract tokens back at the current price and reward ratio
 *
 * @param ctx - The account context containing all required accounts
 * @param no_of_contracts - Contract tokens returned by the user
 */
pub fn handle_redeem(ctx: Context<Redeem>, no_of_contracts: u64) -> Result<()> {
    let escrow_signer = ctx.accounts.escrow_signer.key();
    let escrow_usdc_balance = ctx.accounts.usdc_escrow.amount;
    let escrow_ftr_balance = ctx.accounts.ftr_escrow.amount;
    let distributor = &mut ctx.accounts.distributor_account;

    // ===== VALIDATION PHASE =====

    distributor.verify_escrow_signer(&escrow_signer, ctx.program_id)?;

    // ===== EFFECTS PHASE =====

    let quote =
        distributor.record_redemption(no_of_contracts, escrow_usdc_balance, escrow_ftr_balance)?;
    let total_contracts = distributor.total_contracts;
    let distributor_key = distributor.key();

    // ===== INTERACTIONS PHASE =====

    // User's contract tokens back into the escrow
    transfer_token(
        ctx.accounts.user_authority.to_account_info(),
        ctx.accounts.user_contract.to_account_info(),
        ctx.accounts.contract_escrow.to_account_info(),
        ctx.accounts.contract_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        quote.no_of_contracts,
        ctx.accounts.contract_mint.decimals,
        None,
    )?;

    let seeds = ctx.accounts.distributor_account.signer_seeds();
    let signer = &[&seeds[..]];

    // USDC refund
    transfer_token(
        ctx.accounts.escrow_signer.to_account_info(),
        ctx.accounts.usdc_escrow.to_account_info(),
        ctx.accounts.user_usdc.to_account_info(),
        ctx.accounts.usdc_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        quote.amount_in_usdc,
        ctx.accounts.usdc_mint.decimals,
        Some(signer),
    )?;

    // FTR refund
    transfer_token(
        ctx.accounts.escrow_signer.to_account_info(),
        ctx.accounts.ftr_escrow.to_account_info(),
        ctx.accounts.user_ftr.to_account_info(),
        ctx.accounts.ftr_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        quote.amount_in_ftr,
        ctx.accounts.ftr_mint.decimals,
        Some(signer),
    )?;

    msg!(
        "Redeemed {} contracts for {} usdc and {} ftr, {} in escrow",
        quote.no_of_contracts,
        quote.amount_in_usdc,
        quote.amount_in_ftr,
        total_contracts
    );

    emit_cpi!(ContractsRedeemed {
        distributor: distributor_key,
        user: ctx.accounts.user_authority.key(),
        no_of_contracts: quote.no_of_contracts,
        amount_in_usdc: quote.amount_in_usdc,
        amount_in_ftr: quote.amount_in_ftr,
        total_contracts,
    });

    Ok(())
}
