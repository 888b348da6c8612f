//! Demo service - manage demo mode
//!
//! Demo mode provides a sample inbox for testing and onboarding
//! without reading a real device message store. The demo records live
//! in their own store file and are seeded through the normal ingest
//! path, so parsing and deduplication are exercised for real.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use crate::adapters::{DemoMessageSource, JsonFileStore};
use crate::config::Config;
use crate::services::IngestService;

pub const DEMO_STORE_FILE: &str = "demo.json";

/// Demo service for managing demo mode
pub struct DemoService {
    centime_dir: PathBuf,
}

impl DemoService {
    pub fn new(centime_dir: &Path) -> Self {
        Self {
            centime_dir: centime_dir.to_path_buf(),
        }
    }

    /// Check if demo mode is currently enabled
    pub fn is_enabled(&self) -> Result<bool> {
        let config = Config::load(&self.centime_dir)?;
        Ok(config.demo_mode)
    }

    /// Enable demo mode
    ///
    /// This will:
    /// 1. Delete any existing demo store (fresh start)
    /// 2. Enable demo mode in config
    /// 3. Seed the demo store through the ingest pipeline
    pub async fn enable(&self) -> Result<DemoSeedResult> {
        let demo_store_path = self.centime_dir.join(DEMO_STORE_FILE);
        if demo_store_path.exists() {
            std::fs::remove_file(&demo_store_path)?;
        }

        let mut config = Config::load(&self.centime_dir).unwrap_or_default();
        config.enable_demo_mode();
        config.save(&self.centime_dir)?;

        let store = Arc::new(JsonFileStore::new(&demo_store_path)?);
        let mut ingest = IngestService::new(store);
        ingest.register_source(Arc::new(DemoMessageSource::new()));

        let sync = ingest.sync_from_source("demo").await?;
        Ok(DemoSeedResult {
            messages_generated: sync.batch.received_count,
            records_created: sync.batch.processed_count,
            noise_filtered: sync.batch.failed_count,
        })
    }

    /// Disable demo mode
    ///
    /// This will:
    /// 1. Disable demo mode in config
    /// 2. Optionally delete the demo store (if clean = true)
    pub fn disable(&self, clean: bool) -> Result<()> {
        let mut config = Config::load(&self.centime_dir).unwrap_or_default();
        config.disable_demo_mode();
        config.save(&self.centime_dir)?;

        if clean {
            let demo_store_path = self.centime_dir.join(DEMO_STORE_FILE);
            if demo_store_path.exists() {
                std::fs::remove_file(&demo_store_path)?;
            }
        }

        Ok(())
    }
}

#[derive(Debug)]
pub struct DemoSeedResult {
    pub messages_generated: i64,
    pub records_created: i64,
    pub noise_filtered: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::TransactionStore;

    #[tokio::test]
    async fn test_enable_seed_disable_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let svc = DemoService::new(dir.path());
        assert!(!svc.is_enabled().unwrap());

        let seeded = svc.enable().await.unwrap();
        assert!(svc.is_enabled().unwrap());
        assert!(seeded.records_created > 30);
        assert!(seeded.noise_filtered > 0, "OTP/promo noise filtered");

        let store = JsonFileStore::new(dir.path().join(DEMO_STORE_FILE)).unwrap();
        assert_eq!(
            store.record_count().await.unwrap() as i64,
            seeded.records_created
        );

        svc.disable(true).unwrap();
        assert!(!svc.is_enabled().unwrap());
        assert!(!dir.path().join(DEMO_STORE_FILE).exists());
    }

    #[tokio::test]
    async fn test_enable_is_reproducible() {
        let dir = tempfile::tempdir().unwrap();
        let svc = DemoService::new(dir.path());

        let first = svc.enable().await.unwrap();
        let second = svc.enable().await.unwrap();
        assert_eq!(first.records_created, second.records_created);
    }
}
