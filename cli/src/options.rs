use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "RaptorQ fountain-code encode/decode tool", long_about = None)]
pub struct CommandLineOptions {
    /// Optional TOML config overriding symbol size / repair overhead / cache settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose logging (equivalent to RUST_LOG=debug)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode a file into a RaptorQ symbol container
    Encode {
        input: PathBuf,
        output: PathBuf,

        /// Symbol size in bytes
        #[arg(short = 's', long, default_value_t = 1024)]
        symbol_size: usize,

        /// Number of repair symbols to generate in addition to the K source symbols
        #[arg(short = 'r', long, default_value_t = 0)]
        repair_overhead: u32,
    },
    /// Decode a RaptorQ symbol container back into the original file
    Decode { input: PathBuf, output: PathBuf },
}
