use anchor_lang::prelude::*;

#[error_code]
pub enum DistributorError {
    // Lifecycle errors
    #[msg("Distributor account is already initialized")]
    AlreadyInitialized,

    // Access control errors
    #[msg("Only the distribution authority can perform this action")]
    Unauthorized,
    #[msg("Escrow signer does not match the stored derivation nonce")]
    AddressDerivationMismatch,
    #[msg("Escrow account does not match the distributor")]
    EscrowMismatch,
    #[msg("Token mint does not match the distributor's mint")]
    TokenMintMismatch,
    #[msg("Only the SPL Token program is supported")]
    UnsupportedTokenProgram,

    // Amount validation errors
    #[msg("Invalid amount")]
    InvalidAmount,
    #[msg("Price of contract must be greater than zero")]
    InvalidPrice,
    #[msg("Creator cannot fund the initial contract supply")]
    InsufficientBalance,
    #[msg("Insufficient no of contracts in the distributor")]
    InsufficientSupply,
    #[msg("Insufficient usdc or ftr in the distributor escrows")]
    InsufficientEscrowFunds,

    // System level errors
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
}
