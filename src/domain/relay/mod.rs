//! The Solana Pay relay state machine.
//!
//! A relay runs through four stateless stages. Everything a later stage
//! needs is carried in the link it was reached through:
//!
//! 1. the client asks for an operation and receives a preview page link,
//! 2. the preview page embeds a QR code image,
//! 3. the QR code encodes a `solana:` transaction request URL,
//! 4. the wallet resolves that URL, first for a label and icon, then for
//!    the unsigned transaction.
use std::sync::Arc;

use log::{debug, info};

use crate::{
    config::ServerConfig,
    constants::SOLANA_PAY_ICON,
    domain::TransactionBuilder,
    models::{
        LinkToSignResponse, Operation, ParameterSet, RelayError, SignRequestMetadata,
        UnsignedTransactionEnvelope,
    },
    services::QrRendererTrait,
};

mod link;
pub use link::*;

mod page;
pub use page::*;

pub struct RelayService {
    base_url: String,
    label: String,
    builder: TransactionBuilder,
    qr_renderer: Arc<dyn QrRendererTrait>,
}

impl RelayService {
    pub fn new(
        config: &ServerConfig,
        builder: TransactionBuilder,
        qr_renderer: Arc<dyn QrRendererTrait>,
    ) -> Self {
        Self {
            base_url: config.self_url.clone(),
            label: config.solana_pay_label.clone(),
            builder,
            qr_renderer,
        }
    }

    /// Issues the preview link for `operation`.
    ///
    /// Required parameters must be present; their values are not checked
    /// until the transaction is built.
    pub fn issue_link(
        &self,
        operation: Operation,
        params: ParameterSet,
    ) -> Result<LinkToSignResponse, RelayError> {
        for name in operation.required_params() {
            params.require(name)?;
        }

        let link = RelayLink::new(operation, params);
        let link_to_sign = link.url(&self.base_url, RelayStage::Page)?;
        info!("Issued relay link for {}", operation);
        Ok(LinkToSignResponse { link_to_sign })
    }

    pub fn preview_page(&self, link: &RelayLink) -> Result<String, RelayError> {
        let page_url = link.url(&self.base_url, RelayStage::Page)?;
        let qr_url = link.url(&self.base_url, RelayStage::Qr)?;
        Ok(render_preview_page(
            link.operation().description(),
            &page_url,
            &qr_url,
        ))
    }

    /// The `solana:` URL encoded in the QR image for `link`.
    pub fn wallet_url(&self, link: &RelayLink) -> Result<String, RelayError> {
        link.wallet_url(&self.base_url)
    }

    /// PNG image of the wallet URL. Rendering runs on the blocking pool.
    pub async fn qr_code(&self, link: &RelayLink) -> Result<Vec<u8>, RelayError> {
        let payload = self.wallet_url(link)?;
        debug!("Rendering QR code for {}", link.operation());

        let renderer = Arc::clone(&self.qr_renderer);
        let png = tokio::task::spawn_blocking(move || renderer.render_png(&payload))
            .await
            .map_err(|e| RelayError::Rendering(format!("QR rendering task failed: {e}")))??;
        Ok(png)
    }

    pub fn sign_request_metadata(&self) -> SignRequestMetadata {
        SignRequestMetadata {
            label: self.label.clone(),
            icon: SOLANA_PAY_ICON.to_string(),
        }
    }

    pub async fn build_transaction(
        &self,
        link: &RelayLink,
        wallet_account: Option<&str>,
    ) -> Result<UnsignedTransactionEnvelope, RelayError> {
        let envelope = self
            .builder
            .build(link.operation(), link.params(), wallet_account)
            .await?;
        info!("Built unsigned transaction for {}", link.operation());
        Ok(envelope)
    }
}
