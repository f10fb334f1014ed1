use raptorq_cli::{decode_file, encode_file};

#[test]
fn cli_library_functions_roundtrip_a_file_with_repair_overhead() {
    logger::init();
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("object.bin");
    let container = dir.path().join("object.rqf");
    let output = dir.path().join("object.out");

    let data: Vec<u8> = (0u32..20_000).map(|i| ((i * 7) % 251) as u8).collect();
    std::fs::write(&input, &data).unwrap();

    encode_file(&input, &container, 512, 6).unwrap();
    decode_file(&container, &output).unwrap();

    assert_eq!(std::fs::read(&output).unwrap(), data);
}
