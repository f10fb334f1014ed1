//! RaptorQ fountain-code core (RFC 6330): GF(256) arithmetic, parameter
//! derivation, the precode matrix, the intermediate-symbol solver, and
//! the systematic encoder/decoder built on top of them.

pub mod bitmask;
pub mod cache;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod ffi;
pub mod gf256;
pub mod interleaver;
pub mod matrix;
pub mod oplog;
pub mod params;
pub mod precode;
pub mod solver;
pub mod tuple;

pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::{RaptorQCoreError, Result};
pub use params::Parameters;
