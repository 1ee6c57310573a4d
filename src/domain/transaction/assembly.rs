//! Compiling instructions into unsigned wire transactions.
use solana_sdk::{
    hash::Hash,
    instruction::Instruction,
    message::Message,
    pubkey::Pubkey,
    signature::Keypair,
    signer::Signer,
    transaction::Transaction,
};

use crate::{models::RelayError, utils::base64_encode};

/// Compiles `instructions` into a legacy transaction paid by `fee_payer`.
/// No signatures are set.
pub fn compile_unsigned(
    instructions: &[Instruction],
    fee_payer: &Pubkey,
    recent_blockhash: Hash,
) -> Transaction {
    let message = Message::new_with_blockhash(instructions, Some(fee_payer), &recent_blockhash);
    Transaction::new_unsigned(message)
}

/// Serializes a transaction to its base64 wire form.
pub fn encode_transaction(transaction: &Transaction) -> Result<String, RelayError> {
    let bytes = bincode::serialize(transaction)
        .map_err(|e| RelayError::Validation(format!("Failed to serialize transaction: {e}")))?;
    Ok(base64_encode(&bytes))
}

pub fn assemble_unsigned(
    instructions: &[Instruction],
    fee_payer: &Pubkey,
    recent_blockhash: Hash,
) -> Result<String, RelayError> {
    encode_transaction(&compile_unsigned(instructions, fee_payer, recent_blockhash))
}

/// Assembles a transaction that needs a freshly generated account as
/// co-signer.
///
/// `build` receives the new account's address. The keypair signs its own
/// slot and is dropped before returning; only the address leaves this
/// function. The fee payer's slot stays empty.
pub fn assemble_with_ephemeral_account<F>(
    fee_payer: &Pubkey,
    recent_blockhash: Hash,
    build: F,
) -> Result<(String, Pubkey), RelayError>
where
    F: FnOnce(&Pubkey) -> Result<Vec<Instruction>, RelayError>,
{
    let account = Keypair::new();
    let address = account.pubkey();
    let instructions = build(&address)?;

    let mut transaction = compile_unsigned(&instructions, fee_payer, recent_blockhash);
    transaction
        .try_partial_sign(&[&account], recent_blockhash)
        .map_err(|e| RelayError::Validation(format!("Failed to sign with new account: {e}")))?;

    Ok((encode_transaction(&transaction)?, address))
}
