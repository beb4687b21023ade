use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::DistributorError;
use crate::state::ParamUpdate;
use crate::utils::verify_escrow_signer;

/**
 * Main distributor state account
 *
 * Holds the fixed exchange rate between contract tokens and USDC/FTR, the
 * remaining contract-token supply and the addresses of the three escrows.
 *
 * Address: a keypair chosen by the creator at initialization
 *
 * Lifecycle:
 * 1. Created during initialize_distributor, full supply moved into the contract escrow
 * 2. Price and reward ratio changed by update_distributor
 * 3. total_contracts decreases on distribute and withdraw, increases on redeem
 * 4. Never closed; an empty escrow is a valid steady state
 */
#[account]
#[derive(Default, Debug)]
pub struct DistributorAccount {
    /// Authority of the distributor
    /// - Funds the initial supply
    /// - Only account allowed to update parameters or withdraw escrow funds
    pub authority: Pubkey,

    /// USDC base units paid per contract token
    /// - Always at least MIN_PRICE_OF_CONTRACT
    pub price_of_contract: u64,

    /// FTR base units paid per contract token
    pub ftr_per_contract: u64,

    /// Contract tokens held by the contract escrow
    /// - Tracks the escrow balance across distribute, redeem and withdraw
    pub total_contracts: u64,

    /// Mint of the contract token
    pub contract_mint: Pubkey,

    /// Mint of the USDC token
    pub usdc_mint: Pubkey,

    /// Mint of the FTR token
    /// - Also the fixed seed of the escrow signer PDA
    pub ftr_mint: Pubkey,

    /// Escrow token account holding the contract tokens
    pub contract_escrow: Pubkey,

    /// Escrow token account receiving USDC payments
    pub usdc_escrow: Pubkey,

    /// Escrow token account receiving FTR payments
    pub ftr_escrow: Pubkey,

    /// PDA owning the three escrows
    /// - Derived from: [ftr_mint, signer_nonce]
    pub escrow_signer: Pubkey,

    /// Bump of the escrow signer PDA
    /// - Saved so the signer can be recomputed on every escrow-signing instruction
    pub signer_nonce: u8,
}

/// Addresses wired into a distributor when it is created
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EscrowConfig {
    pub contract_mint: Pubkey,
    pub usdc_mint: Pubkey,
    pub ftr_mint: Pubkey,
    pub contract_escrow: Pubkey,
    pub usdc_escrow: Pubkey,
    pub ftr_escrow: Pubkey,
    pub escrow_signer: Pubkey,
    pub signer_nonce: u8,
}

/// Counter-amounts owed for a number of contract tokens at the current rate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Quote {
    pub no_of_contracts: u64,
    pub amount_in_usdc: u64,
    pub amount_in_ftr: u64,
}

impl DistributorAccount {
    /// Calculate the space required for this account
    /// - Includes 8-byte discriminator + struct size
    pub const LEN: usize = 8 + std::mem::size_of::<DistributorAccount>();

    pub fn is_initialized(&self) -> bool {
        self.authority != Pubkey::default()
    }

    /// Writes the initial configuration
    ///
    /// `creator_balance` is the creator's contract-token balance, which must
    /// cover the whole `no_of_contracts` moved into the escrow.
    pub fn initialize(
        &mut self,
        authority: Pubkey,
        price_of_contract: u64,
        ftr_per_contract: u64,
        no_of_contracts: u64,
        creator_balance: u64,
        escrow: EscrowConfig,
    ) -> Result<()> {
        require!(!self.is_initialized(), DistributorError::AlreadyInitialized);
        require!(
            price_of_contract >= MIN_PRICE_OF_CONTRACT,
            DistributorError::InvalidPrice
        );
        require!(no_of_contracts > 0, DistributorError::InvalidAmount);
        require!(
            creator_balance >= no_of_contracts,
            DistributorError::InsufficientBalance
        );

        self.authority = authority;
        self.price_of_contract = price_of_contract;
        self.ftr_per_contract = ftr_per_contract;
        self.total_contracts = no_of_contracts;
        self.contract_mint = escrow.contract_mint;
        self.usdc_mint = escrow.usdc_mint;
        self.ftr_mint = escrow.ftr_mint;
        self.contract_escrow = escrow.contract_escrow;
        self.usdc_escrow = escrow.usdc_escrow;
        self.ftr_escrow = escrow.ftr_escrow;
        self.escrow_signer = escrow.escrow_signer;
        self.signer_nonce = escrow.signer_nonce;

        Ok(())
    }

    /// Applies a price and/or reward ratio change requested by `caller`
    ///
    /// Both values are validated before either is written.
    pub fn update(
        &mut self,
        caller: Pubkey,
        price_of_contract: ParamUpdate,
        ftr_per_contract: ParamUpdate,
    ) -> Result<()> {
        require_keys_eq!(caller, self.authority, DistributorError::Unauthorized);

        let new_price = price_of_contract.resolve(self.price_of_contract);
        require!(
            new_price >= MIN_PRICE_OF_CONTRACT,
            DistributorError::InvalidPrice
        );

        self.price_of_contract = new_price;
        self.ftr_per_contract = ftr_per_contract.resolve(self.ftr_per_contract);

        Ok(())
    }

    /// USDC and FTR owed for `no_of_contracts` at the current price and ratio
    pub fn quote(&self, no_of_contracts: u64) -> Result<Quote> {
        require!(no_of_contracts > 0, DistributorError::InvalidAmount);

        let amount_in_usdc = self
            .price_of_contract
            .checked_mul(no_of_contracts)
            .ok_or(DistributorError::ArithmeticOverflow)?;
        let amount_in_ftr = self
            .ftr_per_contract
            .checked_mul(no_of_contracts)
            .ok_or(DistributorError::ArithmeticOverflow)?;

        Ok(Quote {
            no_of_contracts,
            amount_in_usdc,
            amount_in_ftr,
        })
    }

    /// Books contract tokens leaving the escrow for a buyer
    pub fn record_distribution(&mut self, no_of_contracts: u64) -> Result<Quote> {
        require!(
            no_of_contracts <= self.total_contracts,
            DistributorError::InsufficientSupply
        );
        let quote = self.quote(no_of_contracts)?;

        self.total_contracts -= no_of_contracts;
        Ok(quote)
    }

    /// Books contract tokens coming back into the escrow
    ///
    /// The refund is priced at the current rate, which may differ from the
    /// rate the tokens were bought at.
    pub fn record_redemption(
        &mut self,
        no_of_contracts: u64,
        escrow_usdc_balance: u64,
        escrow_ftr_balance: u64,
    ) -> Result<Quote> {
        let quote = self.quote(no_of_contracts)?;
        require!(
            escrow_usdc_balance >= quote.amount_in_usdc
                && escrow_ftr_balance >= quote.amount_in_ftr,
            DistributorError::InsufficientEscrowFunds
        );

        self.total_contracts = self
            .total_contracts
            .checked_add(no_of_contracts)
            .ok_or(DistributorError::ArithmeticOverflow)?;
        Ok(quote)
    }

    /// Books contract tokens pulled out of the escrow by the authority
    pub fn record_contract_withdrawal(&mut self, no_of_contracts: u64) -> Result<()> {
        require!(
            no_of_contracts <= self.total_contracts,
            DistributorError::InsufficientSupply
        );

        self.total_contracts -= no_of_contracts;
        Ok(())
    }

    /// Recomputes the escrow signer from the stored nonce and checks it
    /// against both the recorded address and the presented account
    pub fn verify_escrow_signer(&self, presented: &Pubkey, program_id: &Pubkey) -> Result<()> {
        require_keys_eq!(
            *presented,
            self.escrow_signer,
            DistributorError::AddressDerivationMismatch
        );
        verify_escrow_signer(&self.ftr_mint, self.signer_nonce, program_id, presented)
    }

    /// Signer seeds for CPIs moving funds out of the escrows
    pub fn signer_seeds(&self) -> [&[u8]; ESCROW_SIGNER_SEED_COUNT] {
        [self.ftr_mint.as_ref(), std::slice::from_ref(&self.signer_nonce)]
    }
}
