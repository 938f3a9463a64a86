//! Codec state shared by both directions.
//!
//! Encoding and decoding run the same per-sample transition. The only difference is
//! the [`SymbolCoder`]: the encoder pushes a symbol into the range coder, the decoder
//! pulls one out. Reconstruction and all state updates after that point are shared.

use crate::core::model::{from_symbol, to_symbol, ProbabilityModel};
use crate::core::quant::{dequantize, quantize};
use crate::core::range_coder::{RangeDecoder, RangeEncoder};
use crate::core::types::{ESCAPE_SYMBOL, NUM_TAPS};

use super::predictor::{ActivityTracker, Predictor};

/// One direction of the entropy coder.
///
/// `transmit_*` takes the value the encoder wants to send and returns the value that
/// ends up on the other side of the bitstream. An encoding coder writes its argument
/// and returns it unchanged; a decoding coder ignores its argument and returns what
/// it read.
pub trait SymbolCoder {
    /// Code `symbol` under context `ctx` of `model`.
    fn transmit_symbol(&mut self, model: &ProbabilityModel, ctx: usize, symbol: usize) -> usize;

    /// Code one byte with the flat 1-of-256 distribution.
    ///
    /// A decoder reading a corrupt stream may hand back a value above 255.
    fn transmit_byte(&mut self, byte: u8) -> u32;
}

impl SymbolCoder for RangeEncoder {
    fn transmit_symbol(&mut self, model: &ProbabilityModel, ctx: usize, symbol: usize) -> usize {
        let freqs = model.context(ctx);
        self.encode(freqs.cumulative(symbol), freqs.freqs()[symbol], freqs.total());
        symbol
    }

    fn transmit_byte(&mut self, byte: u8) -> u32 {
        self.encode_raw_byte(byte);
        byte as u32
    }
}

impl SymbolCoder for RangeDecoder<'_> {
    fn transmit_symbol(&mut self, model: &ProbabilityModel, ctx: usize, _symbol: usize) -> usize {
        let freqs = model.context(ctx);
        let value = self.get_freq(freqs.total());
        let (symbol, cum, freq) = freqs.lookup(value);
        self.update(cum, freq);
        symbol
    }

    fn transmit_byte(&mut self, _byte: u8) -> u32 {
        self.decode_raw()
    }
}

/// Everything that evolves sample by sample within one stream.
#[derive(Debug, Clone, PartialEq)]
pub struct CodecState {
    /// previous reconstructed quantized value
    prev_q: i32,
    predictor: Predictor,
    activity: ActivityTracker,
    model: ProbabilityModel,
}

impl CodecState {
    pub fn new() -> Self {
        CodecState {
            prev_q: 0,
            predictor: Predictor::new(),
            activity: ActivityTracker::new(),
            model: ProbabilityModel::new(),
        }
    }

    /// Code one PCM sample.
    pub fn encode_sample(&mut self, encoder: &mut RangeEncoder, sample: i16) {
        self.step(encoder, quantize(sample));
    }

    /// Decode one PCM sample.
    pub fn decode_sample(&mut self, decoder: &mut RangeDecoder<'_>) -> i16 {
        // the decoder never looks at the outgoing side, any target will do
        let q = self.step(decoder, self.prev_q);
        dequantize(q)
    }

    /// The per-sample transition. Returns the reconstructed quantized value.
    pub fn step<C: SymbolCoder>(&mut self, coder: &mut C, q: i32) -> i32 {
        let pred = self.predictor.predict();
        let ctx = self.activity.context();

        let residual = q.saturating_sub(self.prev_q).saturating_add(pred);
        let symbol = coder.transmit_symbol(&self.model, ctx, to_symbol(residual));
        self.model.update(ctx, symbol);

        let reconstructed = if symbol == ESCAPE_SYMBOL {
            let [hi, lo] = (residual as i16).to_be_bytes();
            let hi = coder.transmit_byte(hi);
            let lo = coder.transmit_byte(lo);
            // low 16 bits, so an oversized byte from a corrupt stream bleeds upward
            ((hi << 8) | lo) as u16 as i16 as i32
        } else {
            from_symbol(symbol)
        };

        self.commit(reconstructed, pred);
        self.prev_q
    }

    /// Fold a reconstructed residual into the state.
    ///
    /// `pred` must be the [`CodecState::predict`] value the residual was coded against.
    /// The model update is not part of this; [`CodecState::step`] does it first.
    pub fn commit(&mut self, reconstructed: i32, pred: i32) {
        self.activity.observe(reconstructed);
        self.predictor.adapt(reconstructed);

        let delta = reconstructed.saturating_sub(pred);
        self.prev_q = self.prev_q.saturating_add(delta);
        self.predictor.push(delta);
    }

    /// Model context the next sample will be coded under.
    pub fn context(&self) -> usize {
        self.activity.context()
    }

    /// Predictor output for the next sample.
    pub fn predict(&self) -> i32 {
        self.predictor.predict()
    }

    pub fn prev_q(&self) -> i32 {
        self.prev_q
    }

    pub fn prev_mag(&self) -> i32 {
        self.activity.prev_mag()
    }

    pub fn avg_mag(&self) -> f64 {
        self.activity.avg_mag()
    }

    pub fn weights(&self) -> &[i32; NUM_TAPS] {
        self.predictor.weights()
    }

    pub fn history(&self) -> &[i32; NUM_TAPS] {
        self.predictor.history()
    }

    pub fn model(&self) -> &ProbabilityModel {
        &self.model
    }
}

impl Default for CodecState {
    fn default() -> Self {
        Self::new()
    }
}
