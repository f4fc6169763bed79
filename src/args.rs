
//! Command line argument parser.

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct CliArgs {
  /// If supplied, seed the catalog with a handful of starter games
  /// instead of running the Rocket server.
  #[arg(long)]
  pub seed_catalog: bool,
  /// Force the command, even if dangerous.
  #[arg(long)]
  pub force: bool,
  /// Log at debug level rather than info.
  #[arg(short, long)]
  pub verbose: bool,
}
