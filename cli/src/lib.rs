pub mod config;
pub mod container;
pub mod error;
pub mod options;

use std::fs;
use std::io::Cursor;
use std::path::Path;

use log::{debug, info, warn};
use raptorq::{Decoder, Encoder};

use config::AppConfig;
use error::CliError;

/// Reads `input`, encodes it in `symbol_size`-byte source symbols plus
/// `repair_overhead` repair symbols, and writes the container to `output`.
pub fn encode_file(
    input: &Path,
    output: &Path,
    symbol_size: usize,
    repair_overhead: u32,
) -> Result<(), CliError> {
    let data = fs::read(input)?;
    info!("encoding {} bytes from {:?} with symbol_size={}", data.len(), input, symbol_size);
    let enc = Encoder::new(&data, symbol_size)?;
    let k = enc.params().k;
    let num_symbols = k + repair_overhead;

    let mut buf = Vec::new();
    container::write_header(
        &mut buf,
        &container::Header { k, symbol_size: symbol_size as u32, object_len: data.len() as u64, num_symbols },
    )?;
    for esi in 0..num_symbols {
        let symbol = enc.encode_symbol(esi)?;
        container::write_symbol(&mut buf, esi, &symbol)?;
    }
    fs::write(output, buf)?;
    debug!("wrote {} symbols ({} repair) to {:?}", num_symbols, repair_overhead, output);
    Ok(())
}

/// Reads a container written by [`encode_file`] and reconstructs the
/// original object, writing it to `output`.
pub fn decode_file(input: &Path, output: &Path) -> Result<(), CliError> {
    let raw = fs::read(input)?;
    let mut cursor = Cursor::new(raw);
    let header = container::read_header(&mut cursor)?;
    info!("decoding container with k={} symbol_size={} symbols={}", header.k, header.symbol_size, header.num_symbols);

    let mut dec = Decoder::new(header.k, header.symbol_size as usize)?;
    for _ in 0..header.num_symbols {
        let (esi, data) = container::read_symbol(&mut cursor, header.symbol_size as usize)?;
        if let Err(e) = dec.add_symbol(esi, &data) {
            warn!("dropping symbol esi={}: {}", esi, e);
        }
    }
    let object = dec.decode()?;
    let object = &object[..(header.object_len as usize).min(object.len())];
    fs::write(output, object)?;
    Ok(())
}

/// Applies config-file overrides to CLI-supplied symbol size / repair
/// overhead, config values losing to explicit non-default CLI flags.
pub fn resolve_config(config_path: Option<&Path>) -> Result<Option<AppConfig>, CliError> {
    match config_path {
        Some(path) => {
            let cfg = AppConfig::from_file(path)?;
            cfg.validate()?;
            Ok(Some(cfg))
        }
        None => Ok(None),
    }
}
