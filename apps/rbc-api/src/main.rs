use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = rbc_api::Args::parse();

	rbc_api::run(args).await
}
