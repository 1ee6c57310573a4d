//! Instructions for the on-chain metadata program.
//!
//! The program is an Anchor program: instruction data is the 8-byte
//! discriminator `sha256("global:<name>")[..8]` followed by the
//! Borsh-encoded arguments.
use borsh::BorshSerialize;
use serde_json::json;
use sha2::{Digest, Sha256};
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program,
};

use crate::{
    constants::{
        ANCHOR_GLOBAL_NAMESPACE, MAX_METADATA_PAYLOAD_BYTES, METADATA_IX_CLOSE,
        METADATA_IX_INITIALIZE, METADATA_IX_VALIDATE, METADATA_IX_WRITE,
    },
    models::RelayError,
};

#[derive(BorshSerialize)]
struct InitializeArgs {
    len: u64,
}

#[derive(BorshSerialize)]
struct WriteArgs {
    offset: u64,
    data: Vec<u8>,
}

pub fn anchor_discriminator(instruction_name: &str) -> [u8; 8] {
    let digest = Sha256::digest(format!("{ANCHOR_GLOBAL_NAMESPACE}:{instruction_name}"));
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&digest[..8]);
    discriminator
}

fn instruction_data<T: BorshSerialize>(
    instruction_name: &str,
    args: &T,
) -> Result<Vec<u8>, RelayError> {
    let mut data = anchor_discriminator(instruction_name).to_vec();
    borsh::to_writer(&mut data, args).map_err(|e| {
        RelayError::Validation(format!("Failed to encode {instruction_name} arguments: {e}"))
    })?;
    Ok(data)
}

/// Serialized metadata document for `image`, checked against the size ceiling.
pub fn metadata_payload(image: &str) -> Result<Vec<u8>, RelayError> {
    let payload = json!({ "image": image }).to_string().into_bytes();
    if payload.len() > MAX_METADATA_PAYLOAD_BYTES {
        return Err(RelayError::PayloadTooLarge {
            size: payload.len(),
            limit: MAX_METADATA_PAYLOAD_BYTES,
        });
    }
    Ok(payload)
}

/// Allocates `metadata` with room for `len` bytes, funded by `owner`.
pub fn initialize(
    program_id: &Pubkey,
    metadata: &Pubkey,
    owner: &Pubkey,
    len: u64,
) -> Result<Instruction, RelayError> {
    Ok(Instruction::new_with_bytes(
        *program_id,
        &instruction_data(METADATA_IX_INITIALIZE, &InitializeArgs { len })?,
        vec![
            AccountMeta::new(*metadata, true),
            AccountMeta::new(*owner, true),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
    ))
}

pub fn write(
    program_id: &Pubkey,
    metadata: &Pubkey,
    owner: &Pubkey,
    offset: u64,
    data: Vec<u8>,
) -> Result<Instruction, RelayError> {
    Ok(Instruction::new_with_bytes(
        *program_id,
        &instruction_data(METADATA_IX_WRITE, &WriteArgs { offset, data })?,
        vec![
            AccountMeta::new(*metadata, false),
            AccountMeta::new_readonly(*owner, true),
        ],
    ))
}

/// Marks the written document as complete.
pub fn validate(program_id: &Pubkey, metadata: &Pubkey) -> Instruction {
    Instruction::new_with_bytes(
        *program_id,
        &anchor_discriminator(METADATA_IX_VALIDATE),
        vec![AccountMeta::new(*metadata, false)],
    )
}

/// Closes `metadata`, returning its rent to `recipient`.
pub fn close(
    program_id: &Pubkey,
    metadata: &Pubkey,
    recipient: &Pubkey,
    owner: &Pubkey,
) -> Instruction {
    Instruction::new_with_bytes(
        *program_id,
        &anchor_discriminator(METADATA_IX_CLOSE),
        vec![
            AccountMeta::new(*metadata, false),
            AccountMeta::new(*recipient, false),
            AccountMeta::new_readonly(*owner, true),
        ],
    )
}

/// The initialize, write and validate sequence for one document.
pub fn write_document(
    program_id: &Pubkey,
    metadata: &Pubkey,
    owner: &Pubkey,
    payload: Vec<u8>,
) -> Result<Vec<Instruction>, RelayError> {
    let len = payload.len() as u64;
    Ok(vec![
        initialize(program_id, metadata, owner, len)?,
        write(program_id, metadata, owner, 0, payload)?,
        validate(program_id, metadata),
    ])
}
