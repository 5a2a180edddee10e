// Test utilities for the reputation client
//
// `apply_vote` plays the program's part: it executes a built vote instruction
// against a MemoryLedger the way the deployed program updates accounts, so
// reader and scanner behaviour can be checked end to end without a validator.

#![allow(dead_code)]

use reputation_client::{
    instructions::VoteParams,
    state::{ReputationScoreRecord, UserVoteRecord},
    vote::delta,
    LedgerRejection, MemoryLedger, VoteIntent, VoteValue,
};
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signer},
};

// Program ID for a locally deployed copy of the program
pub fn local_program_id() -> Pubkey {
    Keypair::new().pubkey()
}

pub fn new_identity() -> Pubkey {
    Keypair::new().pubkey()
}

// Executes `intent` against `ledger` as the program would.
// Both accounts are written together or not at all.
pub fn apply_vote(ledger: &MemoryLedger, intent: &VoteIntent) -> Result<(), LedgerRejection> {
    let ix = &intent.instruction;
    let params =
        VoteParams::unpack(&ix.data).map_err(|_| LedgerRejection::DataTypeMismatch)?;

    let voter = ix.accounts[1].pubkey;
    let score_address = ix.accounts[2].pubkey;
    let vote_address = ix.accounts[3].pubkey;

    if voter == params.user_key {
        return Err(LedgerRejection::CannotVoteForYourself);
    }

    let mut score = match read(ledger, &score_address, &ix.program_id)? {
        Some(data) => ReputationScoreRecord::decode(&data)
            .map_err(|_| LedgerRejection::DataTypeMismatch)?,
        None => ReputationScoreRecord::new(intent.reputation_score.bump),
    };

    let prior = match read(ledger, &vote_address, &ix.program_id)? {
        Some(data) => {
            UserVoteRecord::decode(&data)
                .map_err(|_| LedgerRejection::DataTypeMismatch)?
                .value
        }
        None => VoteValue::NoVote,
    };

    score
        .apply(delta(prior, params.vote_value))
        .map_err(|_| LedgerRejection::NoVoteExists)?;

    ledger.insert(score_address, ix.program_id, score.encode());
    ledger.insert(
        vote_address,
        ix.program_id,
        UserVoteRecord::new(params.user_key, voter, params.vote_value).encode(),
    );

    println!(
        "[Ledger] {} -> {}: {:?} -> {:?}",
        voter, params.user_key, prior, params.vote_value
    );
    Ok(())
}

fn read(
    ledger: &MemoryLedger,
    address: &Pubkey,
    program_id: &Pubkey,
) -> Result<Option<Vec<u8>>, LedgerRejection> {
    use reputation_client::AccountSource;

    let account = ledger
        .get_account(address)
        .unwrap_or_else(|never| match never {});
    match account {
        None => Ok(None),
        Some(account) if account.owner != *program_id => Err(LedgerRejection::WrongOwner),
        Some(account) => Ok(Some(account.data)),
    }
}
