//! SOL and SPL token transfer instructions.
use std::str::FromStr;

use rust_decimal::{prelude::ToPrimitive, Decimal};
use solana_sdk::{instruction::Instruction, native_token::LAMPORTS_PER_SOL, pubkey::Pubkey};
use solana_system_interface::instruction as system_instruction;
use spl_associated_token_account::get_associated_token_address;

use crate::models::RelayError;

/// Converts a decimal SOL amount into lamports.
///
/// The amount must be positive and representable in whole lamports.
pub fn parse_sol_amount(amount: &str) -> Result<u64, RelayError> {
    let sol = Decimal::from_str(amount.trim())
        .map_err(|e| RelayError::Validation(format!("Invalid SOL amount {amount}: {e}")))?;
    if sol <= Decimal::ZERO {
        return Err(RelayError::Validation(format!(
            "SOL amount must be positive, got {amount}"
        )));
    }

    let lamports = sol
        .checked_mul(Decimal::from(LAMPORTS_PER_SOL))
        .ok_or_else(|| RelayError::Validation(format!("SOL amount out of range: {amount}")))?;
    if !lamports.fract().is_zero() {
        return Err(RelayError::Validation(format!(
            "SOL amount {amount} is finer than one lamport"
        )));
    }

    lamports
        .to_u64()
        .ok_or_else(|| RelayError::Validation(format!("SOL amount out of range: {amount}")))
}

/// Parses a raw token amount in the mint's smallest unit.
pub fn parse_token_amount(amount: &str) -> Result<u64, RelayError> {
    match amount.trim().parse::<u64>() {
        Ok(0) => Err(RelayError::Validation(
            "Token amount must be positive".to_string(),
        )),
        Ok(value) => Ok(value),
        Err(e) => Err(RelayError::Validation(format!(
            "Invalid token amount {amount}: {e}"
        ))),
    }
}

pub fn transfer_sol(sender: &Pubkey, destination: &Pubkey, lamports: u64) -> Instruction {
    system_instruction::transfer(sender, destination, lamports)
}

/// Moves `amount` of `mint` between the associated token accounts of
/// `sender` and `destination`. The destination account must already exist.
pub fn transfer_token(
    sender: &Pubkey,
    destination: &Pubkey,
    mint: &Pubkey,
    amount: u64,
) -> Result<Instruction, RelayError> {
    let source_ata = get_associated_token_address(sender, mint);
    let destination_ata = get_associated_token_address(destination, mint);

    spl_token::instruction::transfer(
        &spl_token::id(),
        &source_ata,
        &destination_ata,
        sender,
        &[],
        amount,
    )
    .map_err(|e| RelayError::Validation(format!("Invalid token transfer: {e}")))
}
