//! Marketplace partner-API integration: signing, pacing, retrying, and the
//! per-endpoint windowed sources.

pub mod client;
pub mod endpoints;
pub mod envelope;
pub mod signer;

pub use client::{MarketplaceClient, MarketplaceClientConfig};
pub use endpoints::MarketplaceGatewayFactory;
pub use envelope::{Envelope, PagePayload};
pub use signer::RequestSigner;
