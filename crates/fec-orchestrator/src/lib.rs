//! FEC Orchestrator
//!
//! Drives the Reed-Solomon collaborator for the ground-station telemetry link:
//! sizes buffers, runs encode or decode + syndrome check + correction, and
//! classifies every outcome into an [`ExitSignal`].
//!
//! ```text
//! hex payload ──decode_hex──► payload ──encode──► [payload | NPAR parity] ──encode_hex──► hex codeword
//! hex codeword ─decode_hex──► codeword ─syndrome─► clean ─────────────┐
//!                                                 └► correct ─recheck─┴─► payload ──encode_hex──► hex
//! ```
//!
//! The Galois-field algebra lives behind [`EccBackend`]; the shipped backend
//! wraps the `reed-solomon` crate.

use thiserror::Error;

pub mod backend;
pub mod codec;
pub mod config;
pub mod exit;
pub mod report;

pub use backend::{
    EccBackend, ReedSolomonBackend, SyndromeState, TooManyErrors, MAX_BLOCK_LEN, MAX_NPAR, NPAR,
};
pub use codec::{Decoded, FecCodec};
pub use config::FecConfig;
pub use exit::ExitSignal;
pub use hex_codec::ParseError;
pub use report::DecodeReport;

/// Size parameters that cannot describe a valid codeword.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SizeError {
    #[error("parity count {num_parity} outside 0..={codeword_len}")]
    ParityOutOfRange { num_parity: i64, codeword_len: usize },
    #[error("codeword of {len} bytes is shorter than the {npar} parity bytes")]
    CodewordTooShort { len: usize, npar: usize },
    #[error("block of {len} bytes exceeds the {max}-byte Reed-Solomon limit")]
    BlockTooLong { len: usize, max: usize },
    #[error("prefix of {prefix_len} bytes exceeds codeword length {codeword_len}")]
    PrefixOutOfRange { prefix_len: usize, codeword_len: usize },
    #[error("parity length {0} outside 1..=170")]
    InvalidParityLen(usize),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FecError {
    #[error("hex parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("size error: {0}")]
    Size(#[from] SizeError),
    #[error("codeword has too many errors to correct")]
    Uncorrectable,
}

impl FecError {
    pub fn exit_signal(&self) -> ExitSignal {
        match self {
            FecError::Parse(_) => ExitSignal::Parse,
            FecError::Size(_) => ExitSignal::Size,
            FecError::Uncorrectable => ExitSignal::Uncorrectable,
        }
    }
}

pub type Result<T> = std::result::Result<T, FecError>;
