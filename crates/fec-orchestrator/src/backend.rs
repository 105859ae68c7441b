//! Reed-Solomon collaborator seam
//!
//! [`EccBackend`] is the narrow surface the orchestrator needs from an ECC
//! library: encode with appended parity, compute the syndrome of a received
//! block, and attempt in-place correction. [`ReedSolomonBackend`] implements
//! it over the `reed-solomon` crate (GF(2^8), blocks of at most 255 bytes).

use reed_solomon::{Decoder, Encoder};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::SizeError;

/// Parity bytes appended per codeword by the station build.
pub const NPAR: usize = 32;

/// Largest GF(2^8) block, payload and parity together.
pub const MAX_BLOCK_LEN: usize = 255;

/// Largest parity length whose error-locator work fits one block:
/// `npar + npar / 2 <= MAX_BLOCK_LEN`.
pub const MAX_NPAR: usize = 170;

/// Outcome of the syndrome computation over a received block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyndromeState {
    /// All syndromes zero
    Clean,
    /// Error pattern present
    Corrupted,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("error pattern exceeds the correction capability of the code")]
pub struct TooManyErrors;

pub trait EccBackend {
    /// Parity bytes appended by [`EccBackend::encode`].
    fn parity_len(&self) -> usize;

    /// Write `payload` followed by its parity into `out`, returning the number
    /// of bytes written. `out` must hold `payload.len() + parity_len()` bytes.
    fn encode(&self, payload: &[u8], out: &mut [u8]) -> usize;

    /// Compute the syndrome of a full codeword.
    fn decode(&self, codeword: &[u8]) -> SyndromeState;

    /// Correct `codeword` in place, returning how many bytes were changed.
    fn correct(
        &self,
        codeword: &mut [u8],
        erasures: Option<&[u8]>,
    ) -> std::result::Result<usize, TooManyErrors>;
}

/// Backend over the `reed-solomon` crate.
pub struct ReedSolomonBackend {
    npar: usize,
    encoder: Encoder,
    decoder: Decoder,
}

impl ReedSolomonBackend {
    /// One-time setup of the generator polynomial for `npar` parity bytes.
    /// Build once per process and reuse.
    pub fn initialize(npar: usize) -> std::result::Result<Self, SizeError> {
        if npar == 0 || npar > MAX_NPAR {
            return Err(SizeError::InvalidParityLen(npar));
        }
        debug!(npar, "initializing reed-solomon backend");
        Ok(Self {
            npar,
            encoder: Encoder::new(npar),
            decoder: Decoder::new(npar),
        })
    }
}

impl std::fmt::Debug for ReedSolomonBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReedSolomonBackend")
            .field("npar", &self.npar)
            .finish()
    }
}

impl EccBackend for ReedSolomonBackend {
    fn parity_len(&self) -> usize {
        self.npar
    }

    fn encode(&self, payload: &[u8], out: &mut [u8]) -> usize {
        let buffer = self.encoder.encode(payload);
        let data = buffer.data();
        let ecc = buffer.ecc();
        let written = data.len() + ecc.len();
        out[..data.len()].copy_from_slice(data);
        out[data.len()..written].copy_from_slice(ecc);
        written
    }

    fn decode(&self, codeword: &[u8]) -> SyndromeState {
        if self.decoder.is_corrupted(codeword) {
            SyndromeState::Corrupted
        } else {
            SyndromeState::Clean
        }
    }

    fn correct(
        &self,
        codeword: &mut [u8],
        erasures: Option<&[u8]>,
    ) -> std::result::Result<usize, TooManyErrors> {
        let received = codeword.to_vec();
        let recovered = self
            .decoder
            .correct(codeword, erasures)
            .map_err(|_| TooManyErrors)?;

        let data = recovered.data();
        let ecc = recovered.ecc();
        if data.len() + ecc.len() != codeword.len() {
            return Err(TooManyErrors);
        }
        codeword[..data.len()].copy_from_slice(data);
        codeword[data.len()..].copy_from_slice(ecc);

        Ok(received
            .iter()
            .zip(codeword.iter())
            .filter(|(before, after)| before != after)
            .count())
    }
}
