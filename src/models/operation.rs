//! The fixed operation registry.
//!
//! Every name the HTTP layer accepts comes from one of the two enums below.
//! Route registration iterates them, and the exhaustive matches in
//! [`Operation::description`] and the transaction builder give each
//! operation exactly one description and one builder.
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Operations that produce an unsigned transaction through the relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
pub enum Operation {
    #[strum(serialize = "createBuyNFT")]
    CreateBuyNft,
    #[strum(serialize = "createTransferSol")]
    CreateTransferSol,
    #[strum(serialize = "createTransferToken")]
    CreateTransferToken,
    #[strum(serialize = "createWriteNFTMetadata")]
    CreateWriteNftMetadata,
    #[strum(serialize = "createCloseNFTMetadata")]
    CreateCloseNftMetadata,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Shown as the link-preview title and returned to the wallet as `message`.
    pub fn description(&self) -> &'static str {
        match self {
            Operation::CreateBuyNft => "Sign to Buy NFT",
            Operation::CreateTransferSol => "Sign to Transfer SOL",
            Operation::CreateTransferToken => "Sign to Transfer Token",
            Operation::CreateWriteNftMetadata => "Sign to Write NFT Metadata",
            Operation::CreateCloseNftMetadata => "Sign to Close NFT Metadata",
        }
    }

    /// Parameters that must be present before a link is issued.
    ///
    /// Only presence is checked here; formats are validated when the
    /// transaction is built.
    pub fn required_params(&self) -> &'static [&'static str] {
        match self {
            Operation::CreateBuyNft => &["buyer", "token", "price"],
            Operation::CreateTransferSol => &["destination", "amount"],
            Operation::CreateTransferToken => &["mint", "destination", "amount"],
            Operation::CreateWriteNftMetadata => &["owner", "image"],
            Operation::CreateCloseNftMetadata => &["account", "owner"],
        }
    }
}

/// Read-only methods passed through to chain and marketplace providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
pub enum ReadMethod {
    #[strum(serialize = "getBalance")]
    GetBalance,
    #[strum(serialize = "getAccountInfo")]
    GetAccountInfo,
    #[strum(serialize = "getSignaturesForAddress")]
    GetSignaturesForAddress,
    #[strum(serialize = "getTransaction")]
    GetTransaction,
    #[strum(serialize = "getAssetsByOwner")]
    GetAssetsByOwner,
    #[strum(serialize = "getListedCollectionNFTs")]
    GetListedCollectionNfts,
    #[strum(serialize = "getCollectionsByFloorPrice")]
    GetCollectionsByFloorPrice,
}

impl ReadMethod {
    pub fn name(&self) -> &'static str {
        self.into()
    }
}
