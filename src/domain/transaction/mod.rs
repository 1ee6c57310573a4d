//! Builds the unsigned transaction behind each relay operation.
use std::sync::Arc;

use log::{debug, info};
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

use crate::{
    models::{Operation, ParameterSet, RelayError, UnsignedTransactionEnvelope},
    services::{MarketplaceServiceTrait, SolanaProviderTrait},
    utils::base64_encode,
};

pub mod assembly;
pub mod buy;
pub mod metadata;
pub mod transfer;

pub struct TransactionBuilder {
    provider: Arc<dyn SolanaProviderTrait>,
    marketplace: Arc<dyn MarketplaceServiceTrait>,
    metadata_program_id: Pubkey,
}

impl TransactionBuilder {
    pub fn new(
        provider: Arc<dyn SolanaProviderTrait>,
        marketplace: Arc<dyn MarketplaceServiceTrait>,
        metadata_program_id: Pubkey,
    ) -> Self {
        Self {
            provider,
            marketplace,
            metadata_program_id,
        }
    }

    /// Builds the transaction for `operation`.
    ///
    /// `wallet_account` is the address the wallet reported when fetching the
    /// transaction; transfers use it as the sender when present.
    pub async fn build(
        &self,
        operation: Operation,
        params: &ParameterSet,
        wallet_account: Option<&str>,
    ) -> Result<UnsignedTransactionEnvelope, RelayError> {
        let transaction = match operation {
            Operation::CreateBuyNft => self.build_buy_nft(params).await?,
            Operation::CreateTransferSol => {
                self.build_transfer_sol(params, wallet_account).await?
            }
            Operation::CreateTransferToken => {
                self.build_transfer_token(params, wallet_account).await?
            }
            Operation::CreateWriteNftMetadata => self.build_write_metadata(params).await?,
            Operation::CreateCloseNftMetadata => self.build_close_metadata(params).await?,
        };

        Ok(UnsignedTransactionEnvelope::new(
            transaction,
            operation.description(),
        ))
    }

    async fn build_buy_nft(&self, params: &ParameterSet) -> Result<String, RelayError> {
        let buyer = params.pubkey("buyer")?;
        let token = params.pubkey("token")?;
        let price = buy::parse_price(params.require("price")?)?;

        let bytes = self.marketplace.create_buy_tx(&buyer, &token, price).await?;
        debug!("Marketplace returned {} byte buy transaction", bytes.len());
        Ok(base64_encode(&bytes))
    }

    async fn build_transfer_sol(
        &self,
        params: &ParameterSet,
        wallet_account: Option<&str>,
    ) -> Result<String, RelayError> {
        let sender = resolve_sender(params, wallet_account)?;
        let destination = params.pubkey("destination")?;
        let lamports = transfer::parse_sol_amount(params.require("amount")?)?;

        let blockhash = self.provider.get_latest_blockhash().await?;
        let ix = transfer::transfer_sol(&sender, &destination, lamports);
        assembly::assemble_unsigned(&[ix], &sender, blockhash)
    }

    async fn build_transfer_token(
        &self,
        params: &ParameterSet,
        wallet_account: Option<&str>,
    ) -> Result<String, RelayError> {
        let sender = resolve_sender(params, wallet_account)?;
        let destination = params.pubkey("destination")?;
        let mint = params.pubkey("mint")?;
        let amount = transfer::parse_token_amount(params.require("amount")?)?;

        let blockhash = self.provider.get_latest_blockhash().await?;
        let ix = transfer::transfer_token(&sender, &destination, &mint, amount)?;
        assembly::assemble_unsigned(&[ix], &sender, blockhash)
    }

    async fn build_write_metadata(&self, params: &ParameterSet) -> Result<String, RelayError> {
        let owner = params.pubkey("owner")?;
        let payload = metadata::metadata_payload(params.require("image")?)?;

        let blockhash = self.provider.get_latest_blockhash().await?;
        let program_id = self.metadata_program_id;
        let (transaction, metadata_account) =
            assembly::assemble_with_ephemeral_account(&owner, blockhash, |account| {
                metadata::write_document(&program_id, account, &owner, payload)
            })?;

        info!("Prepared metadata account {metadata_account} for owner {owner}");
        Ok(transaction)
    }

    async fn build_close_metadata(&self, params: &ParameterSet) -> Result<String, RelayError> {
        let account = params.pubkey("account")?;
        let owner = params.pubkey("owner")?;

        let blockhash = self.provider.get_latest_blockhash().await?;
        let ix = metadata::close(&self.metadata_program_id, &account, &owner, &owner);
        assembly::assemble_unsigned(&[ix], &owner, blockhash)
    }
}

/// The wallet's account takes precedence over a `sender` parameter.
fn resolve_sender(
    params: &ParameterSet,
    wallet_account: Option<&str>,
) -> Result<Pubkey, RelayError> {
    match wallet_account {
        Some(account) => Pubkey::from_str(account)
            .map_err(|e| RelayError::Validation(format!("Invalid wallet account: {e}"))),
        None => params.pubkey("sender"),
    }
}
