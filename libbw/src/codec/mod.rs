//! Lossy predictive coding for bw
//!
//! Quantize, predict, zig-zag into an adaptive four-context model, range code.
//! Encoder and decoder share one state machine so they stay bit-exact.

pub mod decoder;
pub mod encoder;
pub mod predictor;
pub mod state;

pub use decoder::{DecodedStream, Decoder};
pub use encoder::Encoder;
pub use predictor::{ActivityTracker, Predictor};
pub use state::{CodecState, SymbolCoder};
