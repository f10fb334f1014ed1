//! Precode matrix construction (spec §3, §4.3): the `(L+overhead) x L`
//! constraint matrix `A` whose rows are, in order, the `S` LDPC
//! constraints, the `H` HDPC constraints, and the `K'` encoding-symbol
//! constraints, with `overhead` trailing rows left zero for the decoder
//! to fill in as repair symbols arrive.
use crate::gf256;
use crate::matrix::{matmul, DenseMtx};
use crate::params::{rand, Parameters};

/// Builds `A` with `overhead` spare rows below the first `L`.
pub fn gen(params: &Parameters, overhead: u32) -> DenseMtx {
    let l = params.l as usize;
    let mut a = DenseMtx::zeros(l + overhead as usize, l);

    init_ldpc1(&mut a, params.s, params.b);
    add_identity(&mut a, params.s, 0, params.b);
    init_ldpc2(&mut a, params.w, params.s, params.p);
    init_hdpc(&mut a, params);
    add_identity(&mut a, params.h, params.s, params.l - params.h);
    add_g_enc(&mut a, params);

    a
}

/// `S x B` circulant band: columns are cyclic downshifts of a first
/// column with ones at `0`, `i+1`, `2*(i+1)` (RFC 6330 §5.3.3.3, the
/// closed form for the otherwise-table-driven LDPC1 submatrix).
fn init_ldpc1(a: &mut DenseMtx, s: u32, b: u32) {
    for row in 0..s {
        for col in 0..b {
            let submtx = col / s;
            let hit = row == col % s || row == (col + submtx + 1) % s || row == (col + 2 * (submtx + 1)) % s;
            a.set(row as usize, col as usize, if hit { 1 } else { 0 });
        }
    }
}

fn add_identity(a: &mut DenseMtx, size: u32, skip_row: u32, skip_col: u32) {
    for i in 0..size {
        a.set((skip_row + i) as usize, (skip_col + i) as usize, 1);
    }
}

/// `S x P` band at column offset `skip`: two consecutive ones per row,
/// shifting right by one each row.
fn init_ldpc2(a: &mut DenseMtx, skip: u32, rows: u32, cols: u32) {
    for row in 0..rows {
        let start = row % cols;
        for col in 0..cols {
            let hit = col == start || col == (start + 1) % cols;
            a.set(row as usize, (skip + col) as usize, if hit { 1 } else { 0 });
        }
    }
}

/// `H x (K'+S)` band, RFC 6330 §5.3.3.3: `MT . GAMMA`.
fn make_mt(params: &Parameters) -> DenseMtx {
    let cols = params.k_padded + params.s;
    let mut mt = DenseMtx::zeros(params.h as usize, cols as usize);
    for row in 0..params.h {
        for col in 0..cols - 1 {
            let tmp = rand(col + 1, 6, params.h);
            let hit = row == tmp || row == (tmp + rand(col + 1, 7, params.h - 1) + 1) % params.h;
            mt.set(row as usize, col as usize, if hit { 1 } else { 0 });
        }
        mt.set(row as usize, (cols - 1) as usize, gf256::pow_alpha(row));
    }
    mt
}

/// `(K'+S) x (K'+S)` lower-triangular `GAMMA(i,j) = alpha^(i-j)`.
fn make_gamma(params: &Parameters) -> DenseMtx {
    let n = (params.k_padded + params.s) as usize;
    let mut gamma = DenseMtx::zeros(n, n);
    for row in 0..n {
        for col in 0..=row {
            gamma.set(row, col, gf256::pow_alpha((row - col) as u32));
        }
    }
    gamma
}

fn init_hdpc(a: &mut DenseMtx, params: &Parameters) {
    let mt = make_mt(params);
    let gamma = make_gamma(params);
    let block = matmul(&mt, &gamma);
    for row in 0..block.rows() {
        for col in 0..block.cols() {
            a.set(params.s as usize + row, col, block.get(row, col));
        }
    }
}

/// Rows `[S+H, L)`: row `i` is the encoding constraint for source ESI
/// `i`, one bit per intermediate-symbol index from `get_idxs`.
fn add_g_enc(a: &mut DenseMtx, params: &Parameters) {
    for row in (params.s + params.h)..params.l {
        let isi = row - params.s - params.h;
        for idx in params.get_idxs(isi) {
            a.set(row as usize, idx as usize, 1);
        }
    }
}

/// Writes the encoding constraint for ESI `isi` (source or repair) into
/// row `row` of `a`, zeroing it first. Used by the decoder to extend the
/// matrix as repair symbols arrive past `L`.
pub fn set_encode_row(a: &mut DenseMtx, params: &Parameters, row: usize, isi: u32) {
    let cols = a.cols();
    a.row_mut(row).iter_mut().for_each(|c| *c = 0);
    for idx in params.get_idxs(isi) {
        if (idx as usize) < cols {
            a.set(row, idx as usize, 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_matrix_has_expected_shape() {
        let p = Parameters::for_k(20).unwrap();
        let overhead = 3;
        let a = gen(&p, overhead);
        assert_eq!(a.rows(), (p.l + overhead) as usize);
        assert_eq!(a.cols(), p.l as usize);
    }

    #[test]
    fn ldpc_identity_block_is_actually_identity() {
        let p = Parameters::for_k(15).unwrap();
        let a = gen(&p, 0);
        for i in 0..p.s {
            assert_eq!(a.get(i as usize, (p.b + i) as usize), 1);
        }
    }

    #[test]
    fn hdpc_identity_block_is_actually_identity() {
        let p = Parameters::for_k(15).unwrap();
        let a = gen(&p, 0);
        for i in 0..p.h {
            let row = (p.s + i) as usize;
            let col = (p.l - p.h + i) as usize;
            assert_eq!(a.get(row, col), 1);
        }
    }

    #[test]
    fn g_enc_rows_match_get_idxs() {
        let p = Parameters::for_k(12).unwrap();
        let a = gen(&p, 0);
        for isi in 0..p.k_padded {
            let row = (p.s + p.h + isi) as usize;
            let idxs: std::collections::HashSet<u32> = p.get_idxs(isi).into_iter().collect();
            for col in 0..p.l {
                let expected = if idxs.contains(&col) { 1 } else { 0 };
                assert_eq!(a.get(row, col as usize), expected);
            }
        }
    }

    #[test]
    fn overhead_rows_start_zeroed() {
        let p = Parameters::for_k(10).unwrap();
        let a = gen(&p, 2);
        for col in 0..p.l {
            assert_eq!(a.get(p.l as usize, col as usize), 0);
        }
    }
}
