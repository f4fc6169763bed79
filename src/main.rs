
use gameshelf::args::CliArgs;
use gameshelf::server::run_server;
use gameshelf::{logging, setup};

use clap::Parser;

#[rocket::main]
async fn main() -> anyhow::Result<()> {
  let args = CliArgs::parse();
  logging::init_logger(args.verbose)?;
  if args.seed_catalog {
    setup::seed_starter_catalog(args.force).await?;
    return Ok(());
  }
  run_server().await?;
  Ok(())
}
