use std::sync::Arc;

use color_eyre::eyre;
use tokio::sync::RwLock;

use rbc_config::Config;
use rbc_service::{ComplianceService, Result as ServiceResult};

/// Shared handle to the current catalog snapshot.
///
/// Handlers clone the inner `Arc` and release the lock before querying, so a reload never waits
/// on in-flight requests and those requests finish on the snapshot they started with.
#[derive(Clone)]
pub struct AppState {
	service: Arc<RwLock<Arc<ComplianceService>>>,
}
impl AppState {
	pub async fn new(config: Config) -> color_eyre::Result<Self> {
		let service = load(config).await?;

		Ok(Self::from_service(service))
	}

	pub fn from_service(service: ComplianceService) -> Self {
		Self { service: Arc::new(RwLock::new(Arc::new(service))) }
	}

	pub async fn service(&self) -> Arc<ComplianceService> {
		self.service.read().await.clone()
	}

	/// Rebuilds the catalog from the configured fixture files and swaps it in. On failure the
	/// current snapshot stays in place.
	pub async fn reload(&self) -> color_eyre::Result<Arc<ComplianceService>> {
		let cfg = self.service().await.cfg.clone();
		let fresh = Arc::new(load(cfg).await?);

		*self.service.write().await = fresh.clone();

		let counts = fresh.counts();

		tracing::info!(reports = counts.reports, policies = counts.policies, "Catalog reloaded.");

		Ok(fresh)
	}
}

async fn load(config: Config) -> color_eyre::Result<ComplianceService> {
	let loaded: ServiceResult<ComplianceService> =
		tokio::task::spawn_blocking(move || ComplianceService::load(config))
			.await
			.map_err(|err| eyre::eyre!("Catalog load task failed: {err}."))?;

	Ok(loaded?)
}
