pub mod audio_constants;
pub mod error;
pub mod model;
pub mod quant;
pub mod range_coder;
pub mod types;

pub use audio_constants::*;
pub use error::{format_error, limit_error, BwResult, Error};
pub use model::{from_symbol, to_symbol, ContextFreqs, ProbabilityModel};
pub use quant::{dequantize, quantize, BUCKET_WIDTH};
pub use range_coder::{RangeDecoder, RangeEncoder};
pub use types::*;
