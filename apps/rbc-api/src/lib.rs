pub mod routes;
pub mod state;

use std::{net::SocketAddr, path::PathBuf};

use axum::Router;
use clap::Parser;
use color_eyre::eyre;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use rbc_config::Config;

use crate::state::AppState;

#[derive(Debug, Parser)]
#[command(
	version = rbc_cli::VERSION,
	rename_all = "kebab",
	styles = rbc_cli::styles(),
)]
pub struct Args {
	/// Path to the service TOML file.
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
}

/// Loads the catalog, then serves the public and admin routers until either listener fails.
pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = rbc_config::load(&args.config)?;

	init_tracing(&config.service.log_level);

	let (public_addr, admin_addr) = listen_addrs(&config)?;
	let state = AppState::new(config).await?;
	let counts = state.service().await.counts();

	tracing::info!(reports = counts.reports, policies = counts.policies, "Catalog loaded.");

	tokio::try_join!(
		serve("public", public_addr, routes::router(state.clone())),
		serve("admin", admin_addr, routes::admin_router(state)),
	)?;

	Ok(())
}

/// Public and admin bind addresses.
///
/// The admin listener is loopback only. The public one is too while
/// `security.bind_localhost_only` is set.
pub fn listen_addrs(config: &Config) -> color_eyre::Result<(SocketAddr, SocketAddr)> {
	let public: SocketAddr = config
		.service
		.http_bind
		.parse()
		.map_err(|err| eyre::eyre!("http_bind must be a socket address: {err}."))?;
	let admin: SocketAddr = config
		.service
		.admin_bind
		.parse()
		.map_err(|err| eyre::eyre!("admin_bind must be a socket address: {err}."))?;

	if config.security.bind_localhost_only && !public.ip().is_loopback() {
		eyre::bail!("http_bind must be a loopback address when bind_localhost_only is true.");
	}
	if !admin.ip().is_loopback() {
		eyre::bail!("admin_bind must be a loopback address.");
	}

	Ok((public, admin))
}

async fn serve(listener_name: &'static str, addr: SocketAddr, app: Router) -> color_eyre::Result<()> {
	let listener = TcpListener::bind(addr).await?;
	let bound = listener.local_addr()?;

	tracing::info!(listener = listener_name, %bound, "Listening.");

	axum::serve(listener, app).await?;

	Ok(())
}

fn init_tracing(log_level: &str) {
	let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).init();
}
