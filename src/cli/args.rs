use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "pbichat", version, about = "Chat with your Power BI data from the terminal", propagate_version = true)]
pub struct Cli {
    /// One-shot question input
    pub prompt: Vec<String>,

    #[command(flatten)]
    pub io: IoArgs,

    #[command(flatten)]
    pub runtime: RuntimeArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Debug, Default)]
pub struct IoArgs {
    /// Read the question from a file
    #[arg(short = 'f', long = "file", global = true)]
    pub input_file: Option<String>,

    /// Write the answer text to a file
    #[arg(short = 'o', long = "output", global = true)]
    pub output_file: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct RuntimeArgs {
    /// Override backend base URL for this run
    #[arg(long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// Explicit config file path
    #[arg(long = "config", global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive chat loop over one conversation
    Interactive,
    /// One-shot question
    Ask,

    /// Config management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show the backend's semantic model outline
    Schema,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Query the backend for its service readiness
    Status,
    /// Initialize default config file (~/.pbi_chat/config.toml)
    Init {
        /// Overwrite if exists
        #[arg(long)]
        force: bool,
    },
    Set { key: String, value: String },
    List,
}
