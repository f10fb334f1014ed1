//! Reified row/column operations (spec §3, §4.4, §6, §9).
//!
//! A tagged sum type dispatched by `match`, as the design notes ask for
//! (the original dispatches over an abstract operation via virtual
//! calls; here each variant is flat data with no heap indirection). The
//! ordered sequence of these is the solver's operation log: replaying
//! it against an `(L+overhead) x L` identity produces the dense replay
//! matrix `R` with `C = R . D`.
use crate::matrix::DenseMtx;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OperationRecord {
    Swap(u32, u32),
    AddMul(u32, u32, u8),
    Div(u32, u8),
    Block(Vec<Vec<u8>>),
    Reorder(Vec<u32>),
}

impl OperationRecord {
    /// Apply this operation to `mtx` in place.
    pub fn build_mtx(&self, mtx: &mut DenseMtx) -> crate::error::Result<()> {
        match self {
            OperationRecord::Swap(i, j) => {
                mtx.swap_rows(*i as usize, *j as usize);
            }
            OperationRecord::AddMul(dst, src, beta) => {
                mtx.add_mul_row(*dst as usize, *src as usize, *beta);
            }
            OperationRecord::Div(r, beta) => {
                mtx.scale_row(*r as usize, *beta)?;
            }
            OperationRecord::Block(m) => {
                let n = m.len();
                let cols = mtx.cols();
                let mut new_rows = vec![vec![0u8; cols]; n];
                for (i, new_row) in new_rows.iter_mut().enumerate() {
                    for (k, &coeff) in m[i].iter().enumerate() {
                        if coeff == 0 {
                            continue;
                        }
                        let src = mtx.row(k);
                        for c in 0..cols {
                            new_row[c] = crate::gf256::add(new_row[c], crate::gf256::mul(coeff, src[c]));
                        }
                    }
                }
                for (i, row) in new_rows.into_iter().enumerate() {
                    mtx.row_mut(i).copy_from_slice(&row);
                }
            }
            OperationRecord::Reorder(perm) => {
                let cols = mtx.cols();
                let mut reordered = vec![0u8; perm.len() * cols];
                for (src, &dst) in perm.iter().enumerate() {
                    let dst = dst as usize;
                    reordered[dst * cols..(dst + 1) * cols].copy_from_slice(mtx.row(src));
                }
                for r in 0..perm.len() {
                    mtx.row_mut(r).copy_from_slice(&reordered[r * cols..(r + 1) * cols]);
                }
            }
        }
        Ok(())
    }

    /// Bounded serialization accounting only; not the wire size exactly
    /// (that also depends on how records are framed together).
    pub fn size(&self) -> usize {
        match self {
            OperationRecord::Swap(..) => 1 + 2 + 2,
            OperationRecord::AddMul(..) => 1 + 2 + 2 + 1,
            OperationRecord::Div(..) => 1 + 2 + 1,
            OperationRecord::Block(m) => 1 + 2 + m.len() * m.len(),
            OperationRecord::Reorder(p) => 1 + 2 + p.len() * 2,
        }
    }

    pub fn encode(&self, out: &mut Vec<u8>) {
        match self {
            OperationRecord::Swap(i, j) => {
                out.push(0x01);
                out.extend_from_slice(&(*i as u16).to_be_bytes());
                out.extend_from_slice(&(*j as u16).to_be_bytes());
            }
            OperationRecord::AddMul(i, j, beta) => {
                out.push(0x02);
                out.extend_from_slice(&(*i as u16).to_be_bytes());
                out.extend_from_slice(&(*j as u16).to_be_bytes());
                out.push(*beta);
            }
            OperationRecord::Div(i, beta) => {
                out.push(0x03);
                out.extend_from_slice(&(*i as u16).to_be_bytes());
                out.push(*beta);
            }
            OperationRecord::Block(m) => {
                out.push(0x04);
                out.extend_from_slice(&(m.len() as u16).to_be_bytes());
                for row in m {
                    out.extend_from_slice(row);
                }
            }
            OperationRecord::Reorder(perm) => {
                out.push(0x05);
                out.extend_from_slice(&(perm.len() as u16).to_be_bytes());
                for &t in perm {
                    out.extend_from_slice(&(t as u16).to_be_bytes());
                }
            }
        }
    }

    pub fn decode(buf: &[u8]) -> Option<(Self, usize)> {
        let tag = *buf.first()?;
        let mut pos = 1usize;
        let read_u16 = |buf: &[u8], pos: &mut usize| -> Option<u16> {
            let v = u16::from_be_bytes(buf.get(*pos..*pos + 2)?.try_into().ok()?);
            *pos += 2;
            Some(v)
        };
        match tag {
            0x01 => {
                let i = read_u16(buf, &mut pos)?;
                let j = read_u16(buf, &mut pos)?;
                Some((OperationRecord::Swap(i as u32, j as u32), pos))
            }
            0x02 => {
                let i = read_u16(buf, &mut pos)?;
                let j = read_u16(buf, &mut pos)?;
                let beta = *buf.get(pos)?;
                pos += 1;
                Some((OperationRecord::AddMul(i as u32, j as u32, beta), pos))
            }
            0x03 => {
                let i = read_u16(buf, &mut pos)?;
                let beta = *buf.get(pos)?;
                pos += 1;
                Some((OperationRecord::Div(i as u32, beta), pos))
            }
            0x04 => {
                let cols = read_u16(buf, &mut pos)? as usize;
                let mut m = Vec::with_capacity(cols);
                for _ in 0..cols {
                    let row = buf.get(pos..pos + cols)?.to_vec();
                    pos += cols;
                    m.push(row);
                }
                Some((OperationRecord::Block(m), pos))
            }
            0x05 => {
                let n = read_u16(buf, &mut pos)? as usize;
                let mut perm = Vec::with_capacity(n);
                for _ in 0..n {
                    perm.push(read_u16(buf, &mut pos)? as u32);
                }
                Some((OperationRecord::Reorder(perm), pos))
            }
            _ => None,
        }
    }
}

/// An ordered log, applied front-to-back.
#[derive(Clone, Debug, Default)]
pub struct OperationLog {
    pub ops: Vec<OperationRecord>,
}

impl OperationLog {
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    pub fn push(&mut self, op: OperationRecord) {
        self.ops.push(op);
    }

    pub fn apply(&self, mtx: &mut DenseMtx) -> crate::error::Result<()> {
        for op in &self.ops {
            op.build_mtx(mtx)?;
        }
        Ok(())
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for op in &self.ops {
            op.encode(&mut out);
        }
        out
    }

    pub fn decode(mut buf: &[u8]) -> Option<Self> {
        let mut ops = Vec::new();
        while !buf.is_empty() {
            let (op, consumed) = OperationRecord::decode(buf)?;
            ops.push(op);
            buf = &buf[consumed..];
        }
        Some(Self { ops })
    }

    /// Replay this log against an `rows x rows` identity to obtain the
    /// dense replay matrix `R` such that `C = R . D_original`.
    pub fn replay_matrix(&self, rows: usize) -> crate::error::Result<DenseMtx> {
        let mut identity = DenseMtx::zeros(rows, rows);
        for i in 0..rows {
            identity.set(i, i, 1);
        }
        self.apply(&mut identity)?;
        Ok(identity)
    }
}
