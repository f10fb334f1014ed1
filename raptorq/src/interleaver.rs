//! Sub-block interleaver/de-interleaver (spec §3, §4.9; RFC 6330 §4.4.1).
//!
//! A source block of `K` symbols of `symbol_size` bytes each is not laid
//! out symbol-by-symbol in the object byte stream: each symbol is split
//! into `sub_blocks` sub-symbols, and the stream groups all `K` copies of
//! sub-symbol `0` together, then all `K` copies of sub-symbol `1`, and so
//! on. This lets a receiver start decoding a prefix of the object before
//! every sub-block has arrived. The partition sizing (`Partition`) is the
//! same large/small split RFC 6330 uses for both source-block and
//! sub-block division.
#[derive(Clone, Copy, Debug)]
struct Partition {
    size: [u32; 2],
    num: [u32; 2],
}

impl Partition {
    fn new(total: u32, parts: u32) -> Self {
        let size_small = total / parts;
        let mut size_large = size_small;
        if total % parts != 0 {
            size_large += 1;
        }
        let num_large = total - size_small * parts;
        let num_small = parts - num_large;
        let size_large = if num_large == 0 { 0 } else { size_large };
        Self {
            size: [size_large, size_small],
            num: [num_large, num_small],
        }
    }

    fn tot(&self, part: usize) -> u32 {
        self.size[part] * self.num[part]
    }
}

/// Number of sub-blocks a symbol of `symbol_size` bytes should be split
/// into so that each sub-symbol stays aligned to the platform's native
/// word size (RFC 6330 recommends sub-block sizes be a multiple of the
/// symbol alignment parameter `Al`; we use `size_of::<usize>()` as that
/// alignment unit). Symbols at or below one word are left as a single
/// sub-block.
pub fn word_aligned_sub_blocks(symbol_size: usize) -> usize {
    let word = std::mem::size_of::<usize>();
    (symbol_size / word).max(1)
}

#[derive(Clone, Debug)]
pub struct Interleaver {
    symbol_size: usize,
    k: usize,
    sub_part: Partition,
}

impl Interleaver {
    pub fn new(symbol_size: usize, sub_blocks: usize, k: usize) -> Self {
        Self {
            symbol_size,
            k,
            sub_part: Partition::new(symbol_size as u32, sub_blocks as u32),
        }
    }

    /// Maps `(symbol_id, pos)` — the `pos`-th byte of source symbol
    /// `symbol_id` — to its offset in the underlying object byte stream.
    fn stream_index(&self, symbol_id: usize, pos: usize) -> usize {
        let tot0 = self.sub_part.tot(0) as usize;
        let size0 = self.sub_part.size[0] as usize;
        let size1 = self.sub_part.size[1] as usize;
        let k = self.k;
        if pos < tot0 {
            let sub_blk_id = pos / size0;
            sub_blk_id * k * size0 + symbol_id * size0 + pos % size0
        } else {
            let pos1 = pos - tot0;
            let sub_blk_id = pos1 / size1;
            tot0 * k + sub_blk_id * k * size1 + symbol_id * size1 + pos1 % size1
        }
    }

    /// Splits `data` into `k` symbols of `symbol_size` bytes, reading
    /// through the sub-block mapping; positions past `data.len()` are
    /// zero-padded (RFC 6330 §5.3.2).
    pub fn interleave(&self, data: &[u8]) -> Vec<Vec<u8>> {
        let mut symbols = vec![vec![0u8; self.symbol_size]; self.k];
        for (symbol_id, symbol) in symbols.iter_mut().enumerate() {
            for (pos, byte) in symbol.iter_mut().enumerate() {
                let idx = self.stream_index(symbol_id, pos);
                *byte = data.get(idx).copied().unwrap_or(0);
            }
        }
        symbols
    }

    /// Inverse of [`interleave`]: reassembles the object stream from `k`
    /// symbols and writes the window `[skip, skip + max_bytes)` of it.
    pub fn deinterleave(&self, symbols: &[Vec<u8>], skip: usize, max_bytes: usize) -> Vec<u8> {
        let total = self.k * self.symbol_size;
        let mut stream = vec![0u8; total];
        for (symbol_id, symbol) in symbols.iter().enumerate().take(self.k) {
            for (pos, &byte) in symbol.iter().enumerate().take(self.symbol_size) {
                let idx = self.stream_index(symbol_id, pos);
                stream[idx] = byte;
            }
        }
        let start = skip.min(total);
        let end = (start + max_bytes).min(total);
        stream[start..end].to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_through_interleave_and_deinterleave() {
        let il = Interleaver::new(12, 3, 4);
        let data: Vec<u8> = (0u8..48).collect();
        let symbols = il.interleave(&data);
        assert_eq!(symbols.len(), 4);
        assert!(symbols.iter().all(|s| s.len() == 12));

        let back = il.deinterleave(&symbols, 0, 48);
        assert_eq!(back, data);
    }

    #[test]
    fn pads_short_input_with_zeros() {
        let il = Interleaver::new(8, 2, 2);
        let data = vec![1u8, 2, 3];
        let symbols = il.interleave(&data);
        let back = il.deinterleave(&symbols, 0, 16);
        assert_eq!(&back[..3], &data[..]);
        assert!(back[3..].iter().all(|&b| b == 0));
    }

    #[test]
    fn skip_and_max_bytes_window_the_output() {
        let il = Interleaver::new(6, 2, 3);
        let data: Vec<u8> = (10u8..28).collect();
        let symbols = il.interleave(&data);
        let windowed = il.deinterleave(&symbols, 5, 4);
        let full = il.deinterleave(&symbols, 0, 18);
        assert_eq!(windowed, full[5..9]);
    }

    #[test]
    fn single_sub_block_is_a_plain_split() {
        let il = Interleaver::new(4, 1, 3);
        let data: Vec<u8> = (0u8..12).collect();
        let symbols = il.interleave(&data);
        assert_eq!(symbols[0], &data[0..4]);
        assert_eq!(symbols[1], &data[4..8]);
        assert_eq!(symbols[2], &data[8..12]);
    }
}
