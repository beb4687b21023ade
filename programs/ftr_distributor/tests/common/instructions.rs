//! Distributor fixtures and instruction helpers.

use anchor_lang::prelude::Pubkey;
use anchor_lang::{system_program, InstructionData, ToAccountMetas};
use ftr_distributor::state::ParamUpdate;
use ftr_distributor::utils::find_escrow_signer;
use ftr_distributor::{accounts, instruction};
use litesvm::types::TransactionResult;
use litesvm::LiteSVM;
use solana_sdk::instruction::Instruction;
use solana_sdk::signature::Keypair;
use solana_sdk::signer::Signer;
use solana_sdk::transaction::Transaction;

use super::mock_accounts::{create_mock_mint, create_mock_token_account, SPL_TOKEN_PROGRAM_ID};
use super::setup::event_authority;

pub const CONTRACT_DECIMALS: u8 = 0;
pub const USDC_DECIMALS: u8 = 6;
pub const FTR_DECIMALS: u8 = 6;

/// Build and send a single distributor instruction.
///
/// The blockhash is expired first so that repeating an identical
/// instruction is not rejected as already processed.
pub fn send_instruction(
    svm: &mut LiteSVM,
    accounts: impl ToAccountMetas,
    args: impl InstructionData,
    payer: &Keypair,
    signers: &[&Keypair],
) -> TransactionResult {
    let ix = Instruction {
        program_id: ftr_distributor::ID,
        accounts: accounts.to_account_metas(None),
        data: args.data(),
    };

    svm.expire_blockhash();
    let tx = Transaction::new_signed_with_payer(
        &[ix],
        Some(&payer.pubkey()),
        signers,
        svm.latest_blockhash(),
    );

    svm.send_transaction(tx)
}

// ============================================================================
// Fixtures
// ============================================================================

/// Mints, escrows and creator account of one distributor
pub struct DistributorFixture {
    pub distributor: Keypair,
    pub authority: Keypair,
    pub escrow_signer: Pubkey,
    pub signer_nonce: u8,
    pub token_program: Pubkey,
    pub contract_mint: Pubkey,
    pub usdc_mint: Pubkey,
    pub ftr_mint: Pubkey,
    pub contract_escrow: Pubkey,
    pub usdc_escrow: Pubkey,
    pub ftr_escrow: Pubkey,
    pub creator_contract: Pubkey,
}

/// A buyer with its three token accounts
pub struct UserFixture {
    pub keypair: Keypair,
    pub usdc: Pubkey,
    pub ftr: Pubkey,
    pub contract: Pubkey,
}

impl DistributorFixture {
    /// Classic SPL Token mints, the creator holding `creator_supply` contract tokens
    pub fn new(svm: &mut LiteSVM, creator_supply: u64) -> Self {
        Self::with_token_program(svm, creator_supply, &SPL_TOKEN_PROGRAM_ID)
    }

    pub fn with_token_program(
        svm: &mut LiteSVM,
        creator_supply: u64,
        token_program: &Pubkey,
    ) -> Self {
        let authority = Keypair::new();
        svm.airdrop(&authority.pubkey(), 10_000_000_000).unwrap();

        let contract_mint = create_mock_mint(svm, CONTRACT_DECIMALS, token_program);
        let usdc_mint = create_mock_mint(svm, USDC_DECIMALS, token_program);
        let ftr_mint = create_mock_mint(svm, FTR_DECIMALS, token_program);
        let (escrow_signer, signer_nonce) = find_escrow_signer(&ftr_mint, &ftr_distributor::ID);

        let contract_escrow =
            create_mock_token_account(svm, &contract_mint, &escrow_signer, 0, token_program);
        let usdc_escrow =
            create_mock_token_account(svm, &usdc_mint, &escrow_signer, 0, token_program);
        let ftr_escrow = create_mock_token_account(svm, &ftr_mint, &escrow_signer, 0, token_program);
        let creator_contract = create_mock_token_account(
            svm,
            &contract_mint,
            &authority.pubkey(),
            creator_supply,
            token_program,
        );

        Self {
            distributor: Keypair::new(),
            authority,
            escrow_signer,
            signer_nonce,
            token_program: *token_program,
            contract_mint,
            usdc_mint,
            ftr_mint,
            contract_escrow,
            usdc_escrow,
            ftr_escrow,
            creator_contract,
        }
    }

    pub fn distributor_key(&self) -> Pubkey {
        self.distributor.pubkey()
    }

    /// Fund a new user with USDC and FTR and an empty contract-token account
    pub fn create_user(&self, svm: &mut LiteSVM, usdc: u64, ftr: u64) -> UserFixture {
        let keypair = Keypair::new();
        svm.airdrop(&keypair.pubkey(), 1_000_000_000).unwrap();
        let owner = keypair.pubkey();

        UserFixture {
            usdc: create_mock_token_account(svm, &self.usdc_mint, &owner, usdc, &self.token_program),
            ftr: create_mock_token_account(svm, &self.ftr_mint, &owner, ftr, &self.token_program),
            contract: create_mock_token_account(
                svm,
                &self.contract_mint,
                &owner,
                0,
                &self.token_program,
            ),
            keypair,
        }
    }

    /// (contract, usdc, ftr) held by the three escrows
    pub fn escrow_balances(&self, svm: &LiteSVM) -> (u64, u64, u64) {
        (
            super::get_token_balance(svm, &self.contract_escrow),
            super::get_token_balance(svm, &self.usdc_escrow),
            super::get_token_balance(svm, &self.ftr_escrow),
        )
    }

    pub fn initialize_accounts(&self) -> accounts::InitializeDistributor {
        accounts::InitializeDistributor {
            distributor_account: self.distributor_key(),
            escrow_signer: self.escrow_signer,
            contract_escrow: self.contract_escrow,
            usdc_escrow: self.usdc_escrow,
            ftr_escrow: self.ftr_escrow,
            contract_mint: self.contract_mint,
            usdc_mint: self.usdc_mint,
            ftr_mint: self.ftr_mint,
            creator_contract: self.creator_contract,
            authority: self.authority.pubkey(),
            system_program: system_program::ID,
            token_program: self.token_program,
            event_authority: event_authority(),
            program: ftr_distributor::ID,
        }
    }

    pub fn update_accounts(&self, authority: &Pubkey) -> accounts::UpdateDistributor {
        accounts::UpdateDistributor {
            distributor_account: self.distributor_key(),
            authority: *authority,
            event_authority: event_authority(),
            program: ftr_distributor::ID,
        }
    }

    pub fn distribute_accounts(&self, user: &UserFixture) -> accounts::Distribute {
        accounts::Distribute {
            distributor_account: self.distributor_key(),
            escrow_signer: self.escrow_signer,
            contract_escrow: self.contract_escrow,
            usdc_escrow: self.usdc_escrow,
            ftr_escrow: self.ftr_escrow,
            contract_mint: self.contract_mint,
            usdc_mint: self.usdc_mint,
            ftr_mint: self.ftr_mint,
            user_authority: user.keypair.pubkey(),
            user_usdc: user.usdc,
            user_ftr: user.ftr,
            user_contract: user.contract,
            token_program: self.token_program,
            event_authority: event_authority(),
            program: ftr_distributor::ID,
        }
    }

    pub fn redeem_accounts(&self, user: &UserFixture) -> accounts::Redeem {
        accounts::Redeem {
            distributor_account: self.distributor_key(),
            escrow_signer: self.escrow_signer,
            contract_escrow: self.contract_escrow,
            usdc_escrow: self.usdc_escrow,
            ftr_escrow: self.ftr_escrow,
            contract_mint: self.contract_mint,
            usdc_mint: self.usdc_mint,
            ftr_mint: self.ftr_mint,
            user_authority: user.keypair.pubkey(),
            user_usdc: user.usdc,
            user_ftr: user.ftr,
            user_contract: user.contract,
            token_program: self.token_program,
            event_authority: event_authority(),
            program: ftr_distributor::ID,
        }
    }

    /// Withdraw accounts paying out to `receiver`'s token accounts
    pub fn withdraw_accounts(&self, receiver: &UserFixture) -> accounts::Withdraw {
        accounts::Withdraw {
            distributor_account: self.distributor_key(),
            authority: receiver.keypair.pubkey(),
            escrow_signer: self.escrow_signer,
            contract_escrow: self.contract_escrow,
            usdc_escrow: self.usdc_escrow,
            ftr_escrow: self.ftr_escrow,
            contract_mint: self.contract_mint,
            usdc_mint: self.usdc_mint,
            ftr_mint: self.ftr_mint,
            authority_contract: receiver.contract,
            authority_usdc: receiver.usdc,
            authority_ftr: receiver.ftr,
            token_program: self.token_program,
            event_authority: event_authority(),
            program: ftr_distributor::ID,
        }
    }

    /// Token accounts of the distribution authority, wrapped as a user
    pub fn authority_accounts(&self, svm: &mut LiteSVM) -> UserFixture {
        let owner = self.authority.pubkey();
        UserFixture {
            usdc: create_mock_token_account(svm, &self.usdc_mint, &owner, 0, &self.token_program),
            ftr: create_mock_token_account(svm, &self.ftr_mint, &owner, 0, &self.token_program),
            contract: create_mock_token_account(
                svm,
                &self.contract_mint,
                &owner,
                0,
                &self.token_program,
            ),
            keypair: self.authority.insecure_clone(),
        }
    }
}

// ============================================================================
// Instructions
// ============================================================================

pub fn initialize_distributor(
    svm: &mut LiteSVM,
    fixture: &DistributorFixture,
    price_of_contract: u64,
    ftr_per_contract: u64,
    no_of_contracts: u64,
) -> TransactionResult {
    send_instruction(
        svm,
        fixture.initialize_accounts(),
        instruction::InitializeDistributor {
            price_of_contract,
            ftr_per_contract,
            no_of_contracts,
            signer_nonce: fixture.signer_nonce,
        },
        &fixture.authority,
        &[&fixture.authority, &fixture.distributor],
    )
}

/// Update signed by `authority`, which need not be the distribution authority
pub fn update_distributor(
    svm: &mut LiteSVM,
    fixture: &DistributorFixture,
    authority: &Keypair,
    price_of_contract: ParamUpdate,
    ftr_per_contract: ParamUpdate,
) -> TransactionResult {
    send_instruction(
        svm,
        fixture.update_accounts(&authority.pubkey()),
        instruction::UpdateDistributor {
            price_of_contract,
            ftr_per_contract,
        },
        authority,
        &[authority],
    )
}

pub fn distribute(
    svm: &mut LiteSVM,
    fixture: &DistributorFixture,
    user: &UserFixture,
    no_of_contracts: u64,
) -> TransactionResult {
    send_instruction(
        svm,
        fixture.distribute_accounts(user),
        instruction::Distribute { no_of_contracts },
        &user.keypair,
        &[&user.keypair],
    )
}

pub fn redeem(
    svm: &mut LiteSVM,
    fixture: &DistributorFixture,
    user: &UserFixture,
    no_of_contracts: u64,
) -> TransactionResult {
    send_instruction(
        svm,
        fixture.redeem_accounts(user),
        instruction::Redeem { no_of_contracts },
        &user.keypair,
        &[&user.keypair],
    )
}

pub fn withdraw(
    svm: &mut LiteSVM,
    fixture: &DistributorFixture,
    receiver: &UserFixture,
    no_of_contracts: Option<u64>,
    amount_of_usdc: Option<u64>,
    amount_of_ftr: Option<u64>,
) -> TransactionResult {
    send_instruction(
        svm,
        fixture.withdraw_accounts(receiver),
        instruction::Withdraw {
            no_of_contracts,
            amount_of_usdc,
            amount_of_ftr,
        },
        &receiver.keypair,
        &[&receiver.keypair],
    )
}
