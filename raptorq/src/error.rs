use raptorq_error::RaptorQError;
use thiserror::Error;

/// Errors surfaced by the GF(256)/parameter/solver/encoder/decoder core.
///
/// Kinds mirror spec §7 exactly; `Decodefailure`/`NotSolvable` are
/// recoverable (the caller retries `Decoder::decode` after more
/// `add_symbol` calls), `Stopped` is surfaced unchanged, everything else
/// is terminal for the offending call but leaves the encoder/decoder in
/// a well-defined state.
#[derive(Debug, Error)]
pub enum RaptorQCoreError {
    #[error("K={0} exceeds the maximum supported block size (56403) or is zero")]
    UnsupportedK(u64),

    #[error("payload shorter than symbol_size: got {got}, need {need}")]
    ShortSymbol { got: usize, need: usize },

    #[error("ESI {0} is out of the 20-bit range")]
    EsiOutOfRange(u32),

    #[error("ESI {0} was already received")]
    AlreadyPresent(u32),

    #[error("no source symbols are missing, add_symbol call was unnecessary")]
    NotNeeded,

    #[error("solver phase 1: no row with positive degree available in the working submatrix")]
    Decodefailure,

    #[error("solver phase 2: lower-right block is rank deficient")]
    NotSolvable,

    #[error("solver stopped cooperatively before completion")]
    Stopped,

    #[error("division by zero in GF(256) arithmetic")]
    ArithmeticError,
}

impl RaptorQError for RaptorQCoreError {}

pub type Result<T> = std::result::Result<T, RaptorQCoreError>;
