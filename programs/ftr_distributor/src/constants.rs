use anchor_lang::prelude::*;

/**
 * Program Constants
 *
 * Values shared by the distributor instructions and the off-chain client.
 */

/// ===== PRICING CONSTANTS =====

/// Lowest accepted price of one contract token, in USDC base units
/// - Enforced by initialize_distributor and update_distributor
/// - A zero price would let contract tokens leave the escrow for free
#[constant]
pub const MIN_PRICE_OF_CONTRACT: u64 = 1;

/// ===== PDA SEED CONSTANTS =====

/// Seeds of the escrow signer PDA; the FTR mint is the only fixed one
pub const ESCROW_SIGNER_SEED_COUNT: usize = 2;
