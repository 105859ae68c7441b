//! Encode / decode orchestration
//!
//! All size arithmetic is checked before the backend sees a buffer; the
//! backend only ever receives blocks of `NPAR..=MAX_BLOCK_LEN` bytes.

use hex_codec::{decode_hex, decode_hex_into, decoded_len, encode_hex};
use tracing::{debug, info, warn};

use crate::backend::{EccBackend, ReedSolomonBackend, SyndromeState, MAX_BLOCK_LEN};
use crate::config::FecConfig;
use crate::{FecError, Result, SizeError};

/// A recovered payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Preserved prefix followed by the payload, parity trimmed
    pub payload: Vec<u8>,
    /// Bytes repaired by the correction step
    pub corrected: usize,
    /// Syndrome of the block as received
    pub syndrome: SyndromeState,
}

impl Decoded {
    pub fn payload_hex(&self) -> String {
        encode_hex(&self.payload)
    }
}

/// Orchestrator over an initialized backend.
#[derive(Debug)]
pub struct FecCodec<B = ReedSolomonBackend> {
    backend: B,
}

impl FecCodec<ReedSolomonBackend> {
    pub fn from_config(config: &FecConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(ReedSolomonBackend::initialize(config.parity_len)?))
    }
}

impl<B: EccBackend> FecCodec<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn parity_len(&self) -> usize {
        self.backend.parity_len()
    }

    /// Codeword length for a payload of `payload_len` bytes.
    pub fn encoded_len(&self, payload_len: usize) -> usize {
        payload_len + self.parity_len()
    }

    /// Append parity to `payload`.
    pub fn encode(&self, payload: &[u8]) -> Result<Vec<u8>> {
        let expected = self.encoded_len(payload.len());
        if expected > MAX_BLOCK_LEN {
            return Err(SizeError::BlockTooLong {
                len: expected,
                max: MAX_BLOCK_LEN,
            }
            .into());
        }

        let mut codeword = vec![0u8; expected];
        let written = self.backend.encode(payload, &mut codeword);
        assert_eq!(
            written, expected,
            "backend wrote {written} bytes into a {expected}-byte codeword"
        );

        debug!(payload_len = payload.len(), codeword_len = expected, "encoded");
        Ok(codeword)
    }

    /// Hex payload in, hex codeword out.
    pub fn encode_hex_payload(&self, hex: &str) -> Result<String> {
        let payload = decode_hex(hex)?;
        Ok(encode_hex(&self.encode(&payload)?))
    }

    /// Recover the payload from `codeword`, trimming `num_parity` trailing
    /// bytes from the result.
    pub fn decode(&self, codeword: &[u8], num_parity: i64) -> Result<Decoded> {
        self.decode_with_prefix(codeword, num_parity, 0)
    }

    /// Like [`FecCodec::decode`], but the first `prefix_len` bytes sit outside
    /// the Reed-Solomon block and are passed through unchanged.
    pub fn decode_with_prefix(
        &self,
        codeword: &[u8],
        num_parity: i64,
        prefix_len: usize,
    ) -> Result<Decoded> {
        if prefix_len > codeword.len() {
            return Err(SizeError::PrefixOutOfRange {
                prefix_len,
                codeword_len: codeword.len(),
            }
            .into());
        }
        let (prefix, block) = codeword.split_at(prefix_len);
        let num_parity = self.check_block(block, num_parity)?;

        let mut working = block.to_vec();
        let syndrome = self.backend.decode(&working);
        debug!(block_len = working.len(), ?syndrome, "syndrome computed");

        let corrected = match syndrome {
            SyndromeState::Clean => 0,
            SyndromeState::Corrupted => self.correct(&mut working)?,
        };

        let payload_len = working.len() - num_parity;
        let mut payload = Vec::with_capacity(prefix_len + payload_len);
        payload.extend_from_slice(prefix);
        payload.extend_from_slice(&working[..payload_len]);

        Ok(Decoded {
            payload,
            corrected,
            syndrome,
        })
    }

    /// Hex codeword in, recovered payload out.
    pub fn decode_hex_codeword(&self, hex: &str, num_parity: i64) -> Result<Decoded> {
        self.decode_hex_codeword_with_prefix(hex, num_parity, 0)
    }

    pub fn decode_hex_codeword_with_prefix(
        &self,
        hex: &str,
        num_parity: i64,
        prefix_len: usize,
    ) -> Result<Decoded> {
        let mut codeword = vec![0u8; decoded_len(hex.len())?];
        decode_hex_into(hex, &mut codeword)?;
        self.decode_with_prefix(&codeword, num_parity, prefix_len)
    }

    fn check_block(&self, block: &[u8], num_parity: i64) -> Result<usize> {
        let npar = self.parity_len();
        let trim = usize::try_from(num_parity)
            .ok()
            .filter(|n| *n <= block.len())
            .ok_or(SizeError::ParityOutOfRange {
                num_parity,
                codeword_len: block.len(),
            })?;

        if block.len() < npar {
            return Err(SizeError::CodewordTooShort {
                len: block.len(),
                npar,
            }
            .into());
        }
        if block.len() > MAX_BLOCK_LEN {
            return Err(SizeError::BlockTooLong {
                len: block.len(),
                max: MAX_BLOCK_LEN,
            }
            .into());
        }
        if trim != npar {
            warn!(
                declared = trim,
                npar, "declared parity count differs from the code's parity length"
            );
        }
        Ok(trim)
    }

    fn correct(&self, block: &mut [u8]) -> Result<usize> {
        let repaired = match self.backend.correct(block, None) {
            Ok(repaired) => repaired,
            Err(err) => {
                warn!(%err, "correction failed");
                return Err(FecError::Uncorrectable);
            }
        };

        // The backend may hand back a block it could not actually fix.
        if self.backend.decode(block) != SyndromeState::Clean {
            warn!("syndrome still nonzero after correction");
            return Err(FecError::Uncorrectable);
        }

        info!(repaired, "corrected codeword");
        Ok(repaired)
    }
}
