//! common types and format constants for the bw codec
//!
//! Every constant here is part of the bitstream definition. Changing any of them
//! produces streams that existing decoders cannot read.

use serde::Serialize;
use wasm_bindgen::prelude::*;

// container

/// header size: sample count, sample rate, payload length (u32 LE each)
pub const HEADER_SIZE: usize = 12;

/// format version
pub const VERSION_MAJOR: u8 = 1;
pub const VERSION_MINOR: u8 = 0;

// probability model

/// number of activity contexts
pub const NUM_CONTEXTS: usize = 4;

/// symbols per context (zig-zag residuals plus escape)
pub const NUM_SYMBOLS: usize = 256;

/// slot reserved for residuals outside [-127, 127]
pub const ESCAPE_SYMBOL: usize = 255;

/// largest residual magnitude with its own symbol
pub const MAX_DIRECT_RESIDUAL: i32 = 127;

/// context totals stay strictly below this
pub const MAX_TOTAL: u32 = 200_000;

/// increment for the coded symbol
pub const INC_MAIN: u32 = 90;

/// increment for each neighbour of the coded symbol
pub const INC_SIDE: u32 = 20;

/// (scale, exponent) of the power-law seed curve, quiet to loud
pub const CONTEXT_CURVES: [(f64, f64); NUM_CONTEXTS] = [
    (45000.0, 1.36),
    (35000.0, 1.28),
    (25000.0, 1.22),
    (20000.0, 1.16),
];

// predictor

/// taps in the adaptive predictor
pub const NUM_TAPS: usize = 8;

/// fixed-point shift applied to the weighted history sum
pub const PRED_SHIFT: u32 = 12;

/// sign-sign step per tap, newest first
pub const TAP_STEPS: [i32; NUM_TAPS] = [6, 4, 3, 2, 2, 1, 1, 1];

/// weights at the start of every stream
pub const INITIAL_WEIGHTS: [i32; NUM_TAPS] = [700, 400, 500, 400, 400, 100, 250, 50];

/// weights are clamped to [-WEIGHT_LIMIT, WEIGHT_LIMIT]
pub const WEIGHT_LIMIT: i32 = 8192;

// activity tracking

/// running residual magnitude at the start of every stream
pub const INITIAL_AVG_MAG: f64 = 30.0;

/// per-sample decay of the running magnitude
pub const AVG_MAG_DECAY: f64 = 0.999995;

/// weight of the newest magnitude
pub const AVG_MAG_GAIN: f64 = 0.000005;

/// the running magnitude never drops below this
pub const AVG_MAG_FLOOR: f64 = 1.0;

/// context boundaries as multiples of the running magnitude
pub const CONTEXT_THRESHOLDS: [f64; NUM_CONTEXTS - 1] = [1.0, 3.0, 5.0];

// data structures

/// bw file header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamHeader {
    pub sample_count: u32,
    pub sample_rate: u32,
    pub payload_len: u32,
}

impl Default for StreamHeader {
    fn default() -> Self {
        StreamHeader {
            sample_count: 0,
            sample_rate: 44100,
            payload_len: 0,
        }
    }
}

/// parsed bw file
#[derive(Debug, Clone)]
pub struct CompressedFile {
    pub header: StreamHeader,
    /// payload bytes actually present (may be shorter than `header.payload_len`)
    pub payload: Vec<u8>,
}

impl CompressedFile {
    /// true when the file ended before the declared payload length
    pub fn is_truncated(&self) -> bool {
        self.payload.len() < self.header.payload_len as usize
    }
}

/// info about a bw file
#[wasm_bindgen]
#[derive(Debug, Clone, Serialize)]
pub struct StreamInfo {
    /// Number of samples in the stream
    pub sample_count: u32,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Declared payload size in bytes
    pub payload_len: u32,
    /// Duration in seconds
    pub duration_secs: f64,
    /// File size in bytes
    pub file_size: usize,
    /// Compression ratio against 16-bit mono PCM
    pub compression_ratio: f64,
    /// Did the file end before the declared payload length?
    pub truncated: bool,
}

impl StreamInfo {
    pub fn from_file(file: &CompressedFile, file_size: usize) -> Self {
        let header = &file.header;
        let duration_secs = if header.sample_rate > 0 {
            header.sample_count as f64 / header.sample_rate as f64
        } else {
            0.0
        };
        let original_size = header.sample_count as f64 * 2.0;
        let compression_ratio = if file_size > 0 {
            original_size / file_size as f64
        } else {
            0.0
        };

        StreamInfo {
            sample_count: header.sample_count,
            sample_rate: header.sample_rate,
            payload_len: header.payload_len,
            duration_secs,
            file_size,
            compression_ratio,
            truncated: file.is_truncated(),
        }
    }
}
