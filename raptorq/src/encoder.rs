//! Systematic encoder (spec §3, §4.7): splits an object into `K` source
//! symbols, solves for the `L` intermediate symbols once, and from then
//! on produces any ESI — source or repair — on demand.
use crate::cache::{Cache, CacheKey};
use crate::error::{RaptorQCoreError, Result};
use crate::interleaver::{word_aligned_sub_blocks, Interleaver};
use crate::matrix::DenseMtx;
use crate::params::Parameters;
use crate::{precode, solver};

pub struct Encoder {
    params: Parameters,
    symbol_size: usize,
    source_symbols: Vec<Vec<u8>>,
    intermediate: DenseMtx,
}

impl Encoder {
    /// Splits `data` into `ceil(len / symbol_size)` source symbols and
    /// solves the precode system once; `encode_symbol` is then O(d+d1)
    /// per call. Equivalent to [`Encoder::with_cache`] with no cache.
    pub fn new(data: &[u8], symbol_size: usize) -> Result<Self> {
        Self::with_cache(data, symbol_size, None)
    }

    /// Same as [`Encoder::new`], but consults `cache` for a previously
    /// solved replay matrix before running the five solver phases, and
    /// stores the result for next time. The precode system for a
    /// zero-overhead systematic encode depends only on `K`, not on the
    /// object's bytes, so the cache key is `{k, esis: 0..k}`.
    pub fn with_cache(data: &[u8], symbol_size: usize, cache: Option<&dyn Cache>) -> Result<Self> {
        if symbol_size == 0 {
            return Err(RaptorQCoreError::ShortSymbol { got: 0, need: 1 });
        }
        let k = ((data.len() + symbol_size - 1) / symbol_size).max(1) as u32;
        let params = Parameters::for_k(k)?;

        let sub_blocks = word_aligned_sub_blocks(symbol_size);
        let interleaver = Interleaver::new(symbol_size, sub_blocks, k as usize);
        let source_symbols = interleaver.interleave(data);

        let a = precode::gen(&params, 0);
        let l = params.l as usize;
        let mut d = DenseMtx::zeros(l, symbol_size);
        for (isi, symbol) in source_symbols.iter().enumerate() {
            d.row_mut(params.s as usize + params.h as usize + isi).copy_from_slice(symbol);
        }
        let cache_entry = cache.map(|c| (c, CacheKey::new(k, (0..k).collect())));
        let (intermediate, _log) = solver::intermediate(&params, a, d, cache_entry, None)?;

        Ok(Self {
            params,
            symbol_size,
            source_symbols,
            intermediate,
        })
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn symbol_size(&self) -> usize {
        self.symbol_size
    }

    /// `esi < K` returns the original source symbol verbatim (systematic
    /// property); `esi >= K` synthesizes a repair symbol from the
    /// intermediate symbols via the same tuple generator the decoder
    /// uses to check its work.
    pub fn encode_symbol(&self, esi: u32) -> Result<Vec<u8>> {
        if esi < self.params.k {
            return Ok(self.source_symbols[esi as usize].clone());
        }
        let isi = self.params.isi_for_esi(esi);
        let idxs = self.params.get_idxs(isi);
        let mut out = vec![0u8; self.symbol_size];
        for idx in idxs {
            let row = self.intermediate.row(idx as usize);
            for (o, r) in out.iter_mut().zip(row.iter()) {
                *o = crate::gf256::add(*o, *r);
            }
        }
        Ok(out)
    }
}
