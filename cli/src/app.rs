//! Wiring: the local store, the signer bridge and the flows built on them.

use std::sync::Arc;

use anyhow::Context;

use aidchain_distribution::{ContributionFlow, DistributionFlow, RequestBook, ValidationFlow};
use aidchain_donation::DonationSubmissionFlow;
use aidchain_store::RecordStore;
use aidchain_store_lmdb::integrity::{check_data_dir, check_integrity};
use aidchain_store_lmdb::{LmdbEnvironment, LmdbKvStore};
use aidchain_types::{Clock, SystemClock};
use aidchain_wallet_core::{ConfirmationGate, RpcWalletConnector, WalletConnector};

use crate::config::CliConfig;

pub struct App {
    pub config: CliConfig,
    pub store: Arc<RecordStore>,
    clock: Arc<dyn Clock>,
}

impl App {
    /// Open the local store, reporting integrity problems up front.
    pub fn open(config: CliConfig) -> anyhow::Result<Self> {
        check_data_dir(&config.data_dir).map_err(anyhow::Error::msg)?;
        let env = LmdbEnvironment::open(&config.data_dir, config.map_size_bytes())
            .with_context(|| format!("opening store at {}", config.data_dir.display()))?;
        let kv = LmdbKvStore::open(&env)?;

        let report = check_integrity(&kv)?;
        if !report.is_healthy() {
            for error in &report.errors {
                tracing::warn!(error = %error, "unreadable record list, it will read as empty");
            }
        }
        tracing::debug!(
            keys = report.keys_checked,
            records = report.total_records,
            "store integrity checked"
        );

        Ok(Self {
            config,
            store: Arc::new(RecordStore::new(Arc::new(kv))),
            clock: Arc::new(SystemClock),
        })
    }

    pub fn wallet(&self) -> anyhow::Result<Arc<dyn WalletConnector>> {
        let connector = RpcWalletConnector::new(self.config.signer_url.clone())?;
        Ok(Arc::new(connector))
    }

    pub fn book(&self) -> Arc<RequestBook> {
        Arc::new(RequestBook::load(self.store.clone()))
    }

    pub fn donations(&self) -> anyhow::Result<DonationSubmissionFlow> {
        Ok(DonationSubmissionFlow::new(
            self.wallet()?,
            self.store.clone(),
            self.clock.clone(),
            self.config.params.clone(),
        ))
    }

    pub fn contributions(&self) -> anyhow::Result<ContributionFlow> {
        Ok(ContributionFlow::new(Arc::new(self.donations()?), self.book()))
    }

    pub fn validations(&self) -> anyhow::Result<ValidationFlow> {
        Ok(ValidationFlow::new(
            self.wallet()?,
            self.book(),
            self.store.clone(),
            self.clock.clone(),
            self.config.params.quorum_threshold,
        ))
    }

    pub fn distributions(
        &self,
        gate: Arc<dyn ConfirmationGate>,
    ) -> anyhow::Result<DistributionFlow> {
        Ok(DistributionFlow::new(
            self.wallet()?,
            self.book(),
            self.store.clone(),
            self.clock.clone(),
            gate,
        ))
    }
}
