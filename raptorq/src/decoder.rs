//! Systematic decoder (spec §3, §4.7-4.8): accumulates received symbols
//! until the precode system becomes solvable, then reconstructs whatever
//! source symbols never arrived.
use std::collections::HashMap;

use crate::bitmask::Bitmask;
use crate::cache::{Cache, CacheKey};
use crate::error::{RaptorQCoreError, Result};
use crate::interleaver::{word_aligned_sub_blocks, Interleaver};
use crate::matrix::DenseMtx;
use crate::params::Parameters;
use crate::{precode, solver};

const ESI_MAX: u32 = 1 << 20;

pub struct Decoder {
    params: Parameters,
    symbol_size: usize,
    bitmask: Bitmask,
    source: HashMap<u32, Vec<u8>>,
    repair: Vec<(u32, Vec<u8>)>,
}

impl Decoder {
    pub fn new(k: u32, symbol_size: usize) -> Result<Self> {
        let params = Parameters::for_k(k)?;
        Ok(Self {
            params,
            symbol_size,
            bitmask: Bitmask::new(k),
            source: HashMap::new(),
            repair: Vec::new(),
        })
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    /// Stores one received symbol. Returns `Ok(())` once stored;
    /// `NotNeeded` if every source symbol is already accounted for, and
    /// the caller should just call [`Decoder::decode`].
    pub fn add_symbol(&mut self, esi: u32, data: &[u8]) -> Result<()> {
        if esi >= ESI_MAX {
            return Err(RaptorQCoreError::EsiOutOfRange(esi));
        }
        if data.len() != self.symbol_size {
            return Err(RaptorQCoreError::ShortSymbol {
                got: data.len(),
                need: self.symbol_size,
            });
        }
        if self.bitmask.holes() == 0 {
            return Err(RaptorQCoreError::NotNeeded);
        }
        if self.bitmask.exists(esi) {
            return Err(RaptorQCoreError::AlreadyPresent(esi));
        }
        self.bitmask.add(esi);
        if esi < self.params.k {
            self.source.insert(esi, data.to_vec());
        } else {
            self.repair.push((esi, data.to_vec()));
        }
        Ok(())
    }

    pub fn holes(&self) -> u32 {
        self.bitmask.holes()
    }

    /// Attempts reconstruction. `Decodefailure`/`NotSolvable` mean "not
    /// yet, wait for more symbols" — calling this again after
    /// `add_symbol` is always safe. Equivalent to
    /// [`Decoder::decode_with_cache`] with no cache.
    pub fn decode(&self) -> Result<Vec<u8>> {
        self.decode_with_cache(None)
    }

    /// Same as [`Decoder::decode`], but consults `cache` for a
    /// previously solved replay matrix (keyed by the exact set of
    /// received ESIs) before running the five solver phases, and stores
    /// the result for next time.
    pub fn decode_with_cache(&self, cache: Option<&dyn Cache>) -> Result<Vec<u8>> {
        let p = &self.params;
        let k = p.k;
        let holes = self.bitmask.holes();
        let sub_blocks = word_aligned_sub_blocks(self.symbol_size);

        if holes == 0 {
            let mut symbols = Vec::with_capacity(k as usize);
            for esi in 0..k {
                symbols.push(self.source.get(&esi).cloned().unwrap());
            }
            let interleaver = Interleaver::new(self.symbol_size, sub_blocks, k as usize);
            return Ok(interleaver.deinterleave(&symbols, 0, k as usize * self.symbol_size));
        }

        if (self.repair.len() as u32) < holes {
            return Err(RaptorQCoreError::Decodefailure);
        }
        let overhead = self.repair.len() as u32 - holes;

        let mut a = precode::gen(p, overhead);
        let l = p.l as usize;
        let mut d = DenseMtx::zeros(l + overhead as usize, self.symbol_size);

        for (&esi, data) in &self.source {
            d.row_mut((p.s + p.h + esi) as usize).copy_from_slice(data);
        }

        let mut repair_iter = self.repair.iter();
        for esi in 0..k {
            if self.source.contains_key(&esi) {
                continue;
            }
            let (r_esi, r_data) = repair_iter.next().expect("enough repair symbols checked above");
            let isi = p.isi_for_esi(*r_esi);
            let row = (p.s + p.h + esi) as usize;
            precode::set_encode_row(&mut a, p, row, isi);
            d.row_mut(row).copy_from_slice(r_data);
        }
        for (extra_idx, (r_esi, r_data)) in repair_iter.enumerate() {
            let isi = p.isi_for_esi(*r_esi);
            let row = l + extra_idx;
            precode::set_encode_row(&mut a, p, row, isi);
            d.row_mut(row).copy_from_slice(r_data);
        }

        let mut esis: Vec<u32> = self.source.keys().copied().collect();
        esis.extend(self.repair.iter().map(|(esi, _)| *esi));
        let cache_entry = cache.map(|c| (c, CacheKey::new(k, esis)));
        let (c, _log) = solver::intermediate(p, a, d, cache_entry, None)?;

        let mut symbols = Vec::with_capacity(k as usize);
        for esi in 0..k {
            if let Some(data) = self.source.get(&esi) {
                symbols.push(data.clone());
                continue;
            }
            let idxs = p.get_idxs(esi);
            let mut out = vec![0u8; self.symbol_size];
            for idx in idxs {
                let row = c.row(idx as usize);
                for (o, r) in out.iter_mut().zip(row.iter()) {
                    *o = crate::gf256::add(*o, *r);
                }
            }
            symbols.push(out);
        }

        let interleaver = Interleaver::new(self.symbol_size, sub_blocks, k as usize);
        Ok(interleaver.deinterleave(&symbols, 0, k as usize * self.symbol_size))
    }
}
