use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use unibundle_gen::Model;

#[derive(Clone, Debug, Parser)]
#[command(name = "unibundle", version = env!("CARGO_PKG_VERSION"), about, long_about = None, propagate_version = true)]
pub struct App {
    /// Config file (defaults to ./unibundle.toml when present)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    #[command(alias = "b", name = "bundle", about = "Convert an archived React project into one index.html")]
    Bundle(BundleArg),
    #[command(alias = "i", name = "inspect", about = "Show which files would be sent to the model")]
    Inspect(InspectArg),
}

#[derive(Clone, Debug, Args)]
pub struct BundleArg {
    /// Project archive (.zip, .tar, .tar.gz)
    pub archive: PathBuf,

    /// Output file, or '-' for stdout
    #[arg(short, long, default_value = "index.html")]
    pub output: PathBuf,

    /// Model to use: flash or pro (overrides the config file)
    #[arg(short, long)]
    pub model: Option<Model>,

    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Write the prompt instead of calling the model
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Clone, Debug, Args)]
pub struct InspectArg {
    pub archive: PathBuf,

    /// Print the serialized JSON sent to the model
    #[arg(long)]
    pub json: bool,

    /// Also list every filtering decision
    #[arg(long)]
    pub all: bool,
}
