//! Shared marker trait for this workspace's error enums.
//!
//! Every crate defines its own `thiserror`-derived error enum and
//! implements this trait on it, the way `fec::FECError` does in the
//! teacher crate. It carries no required methods beyond
//! `std::error::Error` + `Send` + `Sync` + `'static`; it exists so that
//! call sites that are generic over "one of this workspace's errors"
//! (logging wrappers, CLI exit-code mapping) have a single bound to
//! reach for instead of re-deriving it per crate.

pub trait RaptorQError: std::error::Error + Send + Sync + 'static {}
