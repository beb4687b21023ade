use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::state::*;
use crate::error::*;
use crate::utils::transfer_token;
use crate::event::*;

/**
 * Account context for withdrawing escrowed funds
 *
 * This instruction allows the distribution authority to pull contract tokens,
 * collected USDC and collected FTR out of the escrows into its own accounts.
 *
 * Access Control: Only the distribution authority
 */
#[event_cpi]
#[derive(Accounts)]
pub struct Withdraw<'info> {
    /// The distributor account
    /// - Modified to decrease total_contracts when contract tokens are withdrawn
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

    /// Must match the authority stored in the distributor
    #[account(
        constraint = authority.key() == distributor_account.authority @ DistributorError::Unauthorized
    )]
    pub authority: Signer<'info>,

    /// PDA signing every withdrawal leg
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

    #[account(
        mut,
        token::mint = contract_mint,
        token::authority = authority,
        token::token_program = token_program,
    )]
    pub authority_contract: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = usdc_mint,
        token::authority = authority,
        token::token_program = token_program,
    )]
    pub authority_usdc: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = ftr_mint,
        token::authority = authority,
        token::token_program = token_program,
    )]
    pub authority_ftr: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Token program, pinned to classic SPL Token so every transfer moves the full amount
    #[account(address = anchor_spl::token::ID @ DistributorError::UnsupportedTokenProgram)]
    pub token_program: Interface<'info, TokenInterface>,
}

/**
 * Withdraws funds from the escrows
 *
 * @param ctx - The account context containing all required accounts
 * @param no_of_contracts - Contract tokens to withdraw, None to skip
 * @param amount_of_usdc - USDC to withdraw, None to skip
 * @param amount_of_ftr - FTR to withdraw, None to skip
 */
pub fn handle_withdraw(
    ctx: Context<Withdraw>,
    no_of_contracts: Option<u64>,
    amount_of_usdc: Option<u64>,
    amount_of_ftr: Option<u64>,
) -> Result<()> {
    let escrow_signer = ctx.accounts.escrow_signer.key();
    let no_of_contracts = no_of_contracts.unwrap_or_default();
    let amount_of_usdc = amount_of_usdc.unwrap_or_default();
    let amount_of_ftr = amount_of_ftr.unwrap_or_default();

    // ===== VALIDATION PHASE =====

    require!(
        amount_of_usdc <= ctx.accounts.usdc_escrow.amount
            && amount_of_ftr <= ctx.accounts.ftr_escrow.amount,
        DistributorError::InsufficientEscrowFunds
    );

    let distributor = &mut ctx.accounts.distributor_account;
    distributor.verify_escrow_signer(&escrow_signer, ctx.program_id)?;

    // ===== EFFECTS PHASE =====

    distributor.record_contract_withdrawal(no_of_contracts)?;
    let total_contracts = distributor.total_contracts;
    let distributor_key = distributor.key();

    // ===== INTERACTIONS PHASE =====

    let seeds = ctx.accounts.distributor_account.signer_seeds();
    let signer = &[&seeds[..]];

    transfer_token(
        ctx.accounts.escrow_signer.to_account_info(),
        ctx.accounts.contract_escrow.to_account_info(),
        ctx.accounts.authority_contract.to_account_info(),
        ctx.accounts.contract_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        no_of_contracts,
        ctx.accounts.contract_mint.decimals,
        Some(signer),
    )?;

    transfer_token(
        ctx.accounts.escrow_signer.to_account_info(),
        ctx.accounts.usdc_escrow.to_account_info(),
        ctx.accounts.authority_usdc.to_account_info(),
        ctx.accounts.usdc_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        amount_of_usdc,
        ctx.accounts.usdc_mint.decimals,
        Some(signer),
    )?;

    transfer_token(
        ctx.accounts.escrow_signer.to_account_info(),
        ctx.accounts.ftr_escrow.to_account_info(),
        ctx.accounts.authority_ftr.to_account_info(),
        ctx.accounts.ftr_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        amount_of_ftr,
        ctx.accounts.ftr_mint.decimals,
        Some(signer),
    )?;

    msg!(
        "Withdrew {} contracts, {} usdc, {} ftr",
        no_of_contracts,
        amount_of_usdc,
        amount_of_ftr
    );

    emit_cpi!(EscrowWithdrawn {
        distributor: distributor_key,
        authority: ctx.accounts.authority.key(),
        no_of_contracts,
        amount_in_usdc: amount_of_usdc,
        amount_in_ftr: amount_of_ftr,
        total_contracts,
    });

    Ok(())
}
