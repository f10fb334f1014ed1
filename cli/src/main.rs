use clap::Parser;
use raptorq_cli::options::{Command, CommandLineOptions};
use raptorq_cli::{decode_file, encode_file, resolve_config};

fn main() {
    let opts = CommandLineOptions::parse();
    if opts.verbose {
        std::env::set_var("RUST_LOG", "debug");
    }
    logger::init();

    let cfg = match resolve_config(opts.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("config error: {e}");
            std::process::exit(1);
        }
    };

    let result = match opts.command {
        Command::Encode { input, output, symbol_size, repair_overhead } => {
            let symbol_size = cfg.as_ref().and_then(|c| c.symbol_size).unwrap_or(symbol_size);
            let repair_overhead = cfg.as_ref().and_then(|c| c.repair_overhead).unwrap_or(repair_overhead);
            encode_file(&input, &output, symbol_size, repair_overhead)
        }
        Command::Decode { input, output } => decode_file(&input, &output),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
