//! Application services and ports for alert retrieval.

#![forbid(unsafe_code)]

mod clock;
mod credential_loader;
mod delivery_service;
mod pipeline;
mod ports;
mod retrieval_service;
mod signer_service;

pub use clock::{Clock, SystemClock};
pub use credential_loader::CredentialLoader;
pub use delivery_service::{DeliveryOutcome, DeliveryService};
pub use pipeline::{CollectorPipeline, RunSummary};
pub use ports::{AlertPageFetcher, ConfigStore, ObjectStore};
pub use retrieval_service::{RetrievalPolicy, RetrievalService};
pub use signer_service::{NonceSource, SignerService, SystemNonceSource};
