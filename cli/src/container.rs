//! On-disk symbol container for the CLI demo. Not part of the core
//! crate's data model (spec non-goal: no OTI container) — just enough
//! framing for this binary to round-trip a file through `raptorq`.
use std::io::{Read, Write};

use crate::error::CliError;

const MAGIC: &[u8; 4] = b"RQF1";

pub struct Header {
    pub k: u32,
    pub symbol_size: u32,
    pub object_len: u64,
    pub num_symbols: u32,
}

pub fn write_header<W: Write>(w: &mut W, h: &Header) -> Result<(), CliError> {
    w.write_all(MAGIC)?;
    w.write_all(&h.k.to_be_bytes())?;
    w.write_all(&h.symbol_size.to_be_bytes())?;
    w.write_all(&h.object_len.to_be_bytes())?;
    w.write_all(&h.num_symbols.to_be_bytes())?;
    Ok(())
}

pub fn read_header<R: Read>(r: &mut R) -> Result<Header, CliError> {
    let mut magic = [0u8; 4];
    r.read_exact(&mut magic)?;
    if &magic != MAGIC {
        return Err(CliError::Container("bad magic".into()));
    }
    let mut buf4 = [0u8; 4];
    r.read_exact(&mut buf4)?;
    let k = u32::from_be_bytes(buf4);
    r.read_exact(&mut buf4)?;
    let symbol_size = u32::from_be_bytes(buf4);
    let mut buf8 = [0u8; 8];
    r.read_exact(&mut buf8)?;
    let object_len = u64::from_be_bytes(buf8);
    r.read_exact(&mut buf4)?;
    let num_symbols = u32::from_be_bytes(buf4);
    Ok(Header { k, symbol_size, object_len, num_symbols })
}

pub fn write_symbol<W: Write>(w: &mut W, esi: u32, data: &[u8]) -> Result<(), CliError> {
    w.write_all(&esi.to_be_bytes())?;
    w.write_all(data)?;
    Ok(())
}

pub fn read_symbol<R: Read>(r: &mut R, symbol_size: usize) -> Result<(u32, Vec<u8>), CliError> {
    let mut buf4 = [0u8; 4];
    r.read_exact(&mut buf4)?;
    let esi = u32::from_be_bytes(buf4);
    let mut data = vec![0u8; symbol_size];
    r.read_exact(&mut data)?;
    Ok((esi, data))
}
