use anchor_lang::prelude::*;

use crate::state::ParamUpdate;

/// Event emitted when a distributor is initialized
#[event]
pub struct DistributorInitialized {
    /// The distributor account public key
    pub distributor: Pubkey,
    /// Authority allowed to update and withdraw
    pub authority: Pubkey,
    /// Escrow signer PDA owning the three escrows
    pub escrow_signer: Pubkey,
    /// USDC base units per contract token
    pub price_of_contract: u64,
    /// FTR base units per contract token
    pub ftr_per_contract: u64,
    /// Contract tokens moved into the escrow
    pub total_contracts: u64,
}

/// Event emitted when price or reward ratio changes
#[event]
pub struct DistributorUpdated {
    pub distributor: Pubkey,
    pub authority: Pubkey,
    /// Requested price change
    pub price_update: ParamUpdate,
    /// Requested reward ratio change
    pub ftr_update: ParamUpdate,
    /// Price after the update
    pub price_of_contract: u64,
    /// Reward ratio after the update
    pub ftr_per_contract: u64,
}

/// Event emitted when a user buys contract tokens
#[event]
pub struct ContractsDistributed {
    pub distributor: Pubkey,
    pub user: Pubkey,
    /// Contract tokens sent to the user
    pub no_of_contracts: u64,
    /// USDC paid into the escrow
    pub amount_in_usdc: u64,
    /// FTR paid into the escrow
    pub amount_in_ftr: u64,
    /// Contract tokens left in the escrow
    pub total_contracts: u64,
}

/// Event emitted when a user returns contract tokens
#[event]
pub struct ContractsRedeemed {
    pub distributor: Pubkey,
    pub user: Pubkey,
    /// Contract tokens returned to the escrow
    pub no_of_contracts: u64,
    /// USDC refunded to the user
    pub amount_in_usdc: u64,
    /// FTR refunded to the user
    pub amount_in_ftr: u64,
    /// Contract tokens held by the escrow afterwards
    pub total_contracts: u64,
}

/// Event emitted when the authority pulls funds out of the escrows
#[event]
pub struct EscrowWithdrawn {
    pub distributor: Pubkey,
    pub authority: Pubkey,
    pub no_of_contracts: u64,
    pub amount_in_usdc: u64,
    pub amount_in_ftr: u64,
    /// Contract tokens left in the escrow
    pub total_contracts: u64,
}
