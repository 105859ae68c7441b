//! Process exit signals
//!
//! Codes are part of the CLI contract: callers tell "bad input" (1) apart
//! from "bad channel" (2).

use serde::Serialize;
use std::process::ExitCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitSignal {
    Success,
    /// Malformed hex input
    Parse,
    /// Syndrome still nonzero after correction
    Uncorrectable,
    /// Parity count or block length inconsistent with the codeword
    Size,
    /// Command line could not be parsed
    Usage,
    /// Result could not be written to stdout
    Output,
}

impl ExitSignal {
    pub const fn code(self) -> u8 {
        match self {
            ExitSignal::Success => 0,
            ExitSignal::Parse => 1,
            ExitSignal::Uncorrectable => 2,
            ExitSignal::Size => 3,
            ExitSignal::Usage => 64,  // EX_USAGE
            ExitSignal::Output => 74, // EX_IOERR
        }
    }
}

impl From<ExitSignal> for ExitCode {
    fn from(signal: ExitSignal) -> Self {
        ExitCode::from(signal.code())
    }
}
