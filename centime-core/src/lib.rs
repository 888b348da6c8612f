//! Centime Core - SMS transaction parsing and cash reconciliation
//!
//! This crate implements the core domain logic following hexagonal architecture:
//!
//! - **domain**: Core business entities (RawMessage, TransactionRecord, etc.)
//! - **parse**: The stateless message-parsing pipeline
//! - **stats**: Percentile and weekday-weighting helpers for ranking
//! - **ports**: Trait definitions for external dependencies (TransactionStore, MessageSource)
//! - **services**: Business logic orchestration
//! - **adapters**: Concrete implementations (JSON file store, demo inbox, etc.)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod parse;
pub mod ports;
pub mod services;
pub mod stats;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use adapters::{DemoMessageSource, JsonFileStore};
use config::Config;
use services::{CashService, IngestService, StatusService, DEMO_STORE_FILE};

// Re-export commonly used types at crate root
pub use domain::result::Error;
pub use domain::{
    CashPosition, CashSummary, Category, Direction, ParsedTransaction, RawMessage, Source,
    SpendSuggestion, TransactionRecord,
};
pub use parse::parse_message;

pub const STORE_FILE: &str = "centime.json";

/// Main context for Centime operations
///
/// This is the primary entry point for all business logic. It holds
/// the store, configuration, and all services.
pub struct CentimeContext {
    pub config: Config,
    pub store: Arc<JsonFileStore>,
    pub ingest_service: IngestService,
    pub cash_service: CashService,
    pub status_service: StatusService,
}

impl CentimeContext {
    /// Create a new Centime context
    pub fn new(centime_dir: &Path) -> Result<Self> {
        let config = Config::load(centime_dir)?;

        // Demo mode runs against its own store file.
        let store_file = if config.demo_mode {
            DEMO_STORE_FILE
        } else {
            STORE_FILE
        };
        let store = Arc::new(JsonFileStore::new(centime_dir.join(store_file))?);

        let mut ingest_service =
            IngestService::new(store.clone() as Arc<dyn ports::TransactionStore>);
        if config.demo_mode {
            ingest_service.register_source(Arc::new(DemoMessageSource::new()));
        }
        let cash_service = CashService::new(store.clone(), config.cash.clone());
        let status_service = StatusService::new(store.clone());

        Ok(Self {
            config,
            store,
            ingest_service,
            cash_service,
            status_service,
        })
    }
}
