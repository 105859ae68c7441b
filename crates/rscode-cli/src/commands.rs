//! Command dispatch

use clap::{Parser, Subcommand};
use fec_orchestrator::{DecodeReport, ExitSignal, FecCodec, FecConfig, FecError, NPAR};
use std::io::Write;
use tracing::{debug, error};

#[derive(Parser, Debug)]
#[command(
    name = "rscode",
    version,
    about = "Reed-Solomon FEC encoder/decoder for hex telemetry payloads"
)]
pub struct Cli {
    /// Parity bytes per codeword (must match the encoder's build)
    #[arg(long, env = "RSCODE_NPAR", default_value_t = NPAR, global = true)]
    pub npar: usize,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Append parity to a hex payload
    Encode {
        /// Payload as hex
        hex_payload: String,
    },
    /// Correct a hex codeword and strip its parity
    Decode {
        /// Received codeword as hex
        hex_codeword: String,

        /// Parity bytes to trim from the recovered codeword
        #[arg(allow_negative_numbers = true)]
        num_parity_bytes: i64,

        /// Leading bytes outside the protected block (e.g. a callsign)
        #[arg(long, default_value_t = 0)]
        prefix_bytes: usize,

        /// Print a JSON decode report instead of bare hex
        #[arg(long)]
        json: bool,
    },
}

/// Run one command, writing the result to `out`. Nothing is written on failure.
pub fn run(cli: &Cli, out: &mut impl Write) -> ExitSignal {
    let codec = match FecCodec::from_config(&FecConfig::new(cli.npar)) {
        Ok(codec) => codec,
        Err(err) => return fail(&err),
    };

    let rendered = match &cli.command {
        Command::Encode { hex_payload } => codec.encode_hex_payload(hex_payload),
        Command::Decode {
            hex_codeword,
            num_parity_bytes,
            prefix_bytes,
            json,
        } => codec
            .decode_hex_codeword_with_prefix(hex_codeword, *num_parity_bytes, *prefix_bytes)
            .map(|decoded| {
                if *json {
                    DecodeReport::new(hex_codeword, &decoded).to_json_compact()
                } else {
                    decoded.payload_hex()
                }
            }),
    };

    match rendered {
        Ok(text) => emit(out, &text),
        Err(err) => fail(&err),
    }
}

fn emit(out: &mut impl Write, text: &str) -> ExitSignal {
    match out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
        Ok(()) => {
            debug!(chars = text.len(), "result written");
            ExitSignal::Success
        }
        Err(err) => {
            error!(%err, "failed to write result");
            ExitSignal::Output
        }
    }
}

fn fail(err: &FecError) -> ExitSignal {
    let signal = err.exit_signal();
    error!(code = signal.code(), "{err}");
    signal
}
