use clap::Parser;
use raptorq_cli::options::{Command, CommandLineOptions};
use raptorq_cli::{decode_file, encode_file};

#[test]
fn parses_encode_subcommand_defaults() {
    let opts = CommandLineOptions::try_parse_from(["prog", "encode", "in.bin", "out.rqf"]).unwrap();
    match opts.command {
        Command::Encode { input, output, symbol_size, repair_overhead } => {
            assert_eq!(input.to_str().unwrap(), "in.bin");
            assert_eq!(output.to_str().unwrap(), "out.rqf");
            assert_eq!(symbol_size, 1024);
            assert_eq!(repair_overhead, 0);
        }
        _ => panic!("expected Encode"),
    }
}

#[test]
fn parses_decode_subcommand() {
    let opts = CommandLineOptions::try_parse_from(["prog", "decode", "in.rqf", "out.bin"]).unwrap();
    match opts.command {
        Command::Decode { input, output } => {
            assert_eq!(input.to_str().unwrap(), "in.rqf");
            assert_eq!(output.to_str().unwrap(), "out.bin");
        }
        _ => panic!("expected Decode"),
    }
}

#[test]
fn end_to_end_file_roundtrip_with_repair_overhead() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("a.bin");
    let container = dir.path().join("a.rqf");
    let output = dir.path().join("a.out");

    let data: Vec<u8> = (0u32..10_000).map(|i| (i % 241) as u8).collect();
    std::fs::write(&input, &data).unwrap();

    encode_file(&input, &container, 256, 8).unwrap();
    decode_file(&container, &output).unwrap();

    assert_eq!(std::fs::read(&output).unwrap(), data);
}
