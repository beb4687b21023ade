use crate::error::*;
use crate::event::*;
use crate::state::*;
use crate::utils::{transfer_token, verify_escrow_signer};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/**
 * Account context for initializing a distributor
 *
 * This instruction sets up the exchange:
 * - Creates the distributor account at a keypair address chosen by the creator
 * - Checks that the escrow signer is the PDA derived from the FTR mint and nonce
 * - Checks that the three escrows are owned by that signer
 * - Transfers the initial contract-token supply from the creator into the contract escrow
 *
 * Access Control: The signing creator becomes the distribution authority
 */
#[event_cpi]
#[derive(Accounts)]
pub struct InitializeDistributor<'info> {
    /// The distributor account
    /// - Must sign, since its address is a fresh keypair
    /// - An address already holding a distributor is rejected with AlreadyInitialized
    #[account(
        init_if_needed,
        payer = authority,
        space = DistributorAccount::LEN,
    )]
    pub distributor_account: Box<Account<'info, DistributorAccount>>,

    /// PDA that owns the three escrows
    /// CHECK: Verified against [ftr_mint, signer_nonce] in the handler
    pub escrow_signer: UncheckedAccount<'info>,

    /// Escrow receiving the initial contract supply
    #[account(
        mut,
        token::mint = contract_mint,
        token::authority = escrow_signer,
        token::token_program = token_program,
    )]
    pub contract_escrow: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Escrow collecting USDC payments
    #[account(
        token::mint = usdc_mint,
        token::authority = escrow_signer,
        token::token_program = token_program,
    )]
    pub usdc_escrow: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Escrow collecting FTR payments
    #[account(
        token::mint = ftr_mint,
        token::authority = escrow_signer,
        token::token_program = token_program,
    )]
    pub ftr_escrow: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mint::token_program = token_program)]
    pub contract_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(mint::token_program = token_program)]
    pub usdc_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(mint::token_program = token_program)]
    pub ftr_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Creator's contract-token account funding the initial supply
    #[account(
        mut,
        token::mint = contract_mint,
        token::authority = authority,
        token::token_program = token_program,
    )]
    pub creator_contract: Box<InterfaceAccount<'info, TokenAccount>>,

    /// The creator and future distribution authority
    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,

    /// Token program, pinned to classic SPL Token so every transfer moves the full amount
    #[account(address = anchor_spl::token::ID @ DistributorError::UnsupportedTokenProgram)]
    pub token_program: Interface<'info, TokenInterface>,
}

/**
 * Initializes the distributor and funds the contract escrow
 *
 * @param ctx - The account context containing all required accounts
 * @param price_of_contract - USDC base units per contract token
 * @param ftr_per_contract - FTR base units per contract token
 * @param no_of_contracts - Contract tokens moved from the creator into escrow
 * @param signer_nonce - Bump of the escrow signer PDA
 */
pub fn handle_initialize_distributor(
    ctx: Context<InitializeDistributor>,
    price_of_contract: u64,
    ftr_per_contract: u64,
    no_of_contracts: u64,
    signer_nonce: u8,
) -> Result<()> {
    let escrow_signer = ctx.accounts.escrow_signer.key();
    let ftr_mint = ctx.accounts.ftr_mint.key();

    // ===== VALIDATION PHASE =====

    verify_escrow_signer(&ftr_mint, signer_nonce, ctx.program_id, &escrow_signer)?;

    let escrow = EscrowConfig {
        contract_mint: ctx.accounts.contract_mint.key(),
        usdc_mint: ctx.accounts.usdc_mint.key(),
        ftr_mint,
        contract_escrow: ctx.accounts.contract_escrow.key(),
        usdc_escrow: ctx.accounts.usdc_escrow.key(),
        ftr_escrow: ctx.accounts.ftr_escrow.key(),
        escrow_signer,
        signer_nonce,
    };

    // ===== EFFECTS PHASE =====

    let authority = ctx.accounts.authority.key();
    let creator_balance = ctx.accounts.creator_contract.amount;
    let distributor = &mut ctx.accounts.distributor_account;
    distributor.initialize(
        authority,
        price_of_contract,
        ftr_per_contract,
        no_of_contracts,
        creator_balance,
        escrow,
    )?;
    let distributor_key = distributor.key();

    // ===== INTERACTIONS PHASE =====

    transfer_token(
        ctx.accounts.authority.to_account_info(),
        ctx.accounts.creator_contract.to_account_info(),
        ctx.accounts.contract_escrow.to_account_info(),
        ctx.accounts.contract_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        no_of_contracts,
        ctx.accounts.contract_mint.decimals,
        None, // Creator signs the deposit
    )?;

    msg!(
        "Distributor initialized with {} contracts at {} usdc and {} ftr each",
        no_of_contracts,
        price_of_contract,
        ftr_per_contract
    );

    emit_cpi!(DistributorInitialized {
        distributor: distributor_key,
        authority,
        escrow_signer,
        price_of_contract,
        ftr_per_contract,
        total_contracts: no_of_contracts,
    });

    Ok(())
}
