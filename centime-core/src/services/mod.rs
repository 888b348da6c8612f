//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case or feature area.

pub mod cash;
mod demo;
mod ingest;
pub mod logging;
mod status;

pub use cash::CashService;
pub use demo::{DemoSeedResult, DemoService, DEMO_STORE_FILE};
pub use ingest::{
    BatchSubmitResult, CsvImportResult, IngestService, SourceSyncResult, SyncStatus,
};
pub use logging::{EntryPoint, LogEntry, LogEvent, LoggingService};
pub use status::{DateRange, StatusService, StatusSummary};
