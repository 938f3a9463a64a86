//! Adaptive frequency tables for residual symbols.
//!
//! Four contexts, quiet to loud, each with 256 slots: slot 0 is a zero residual,
//! slot `2k` is `+k`, slot `2k - 1` is `-k`, and the last slot is the escape for residuals
//! outside [-127, 127].

use super::types::{
    CONTEXT_CURVES, ESCAPE_SYMBOL, INC_MAIN, INC_SIDE, MAX_DIRECT_RESIDUAL, MAX_TOTAL,
    NUM_CONTEXTS, NUM_SYMBOLS,
};

/// Zig-zag a residual into a symbol, or return the escape symbol when out of range.
///
/// 0 → 0, 1 → 2, -1 → 1, 2 → 4, -2 → 3, ...
#[inline]
pub fn to_symbol(residual: i32) -> usize {
    if !(-MAX_DIRECT_RESIDUAL..=MAX_DIRECT_RESIDUAL).contains(&residual) {
        return ESCAPE_SYMBOL;
    }
    if residual > 0 {
        (residual * 2) as usize
    } else {
        (-residual * 2 - (residual != 0) as i32) as usize
    }
}

/// Inverse of [`to_symbol`] for non-escape symbols.
#[inline]
pub fn from_symbol(symbol: usize) -> i32 {
    let s = symbol as i32;
    if s & 1 == 1 {
        -((s + 1) / 2)
    } else {
        s / 2
    }
}

/// Frequency table of one context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextFreqs {
    freqs: [u32; NUM_SYMBOLS],
    total: u32,
}

impl ContextFreqs {
    /// Seed from `scale / (|residual| + 1) ^ exponent`, escape pinned to 1.
    fn seeded(scale: f64, exponent: f64) -> Self {
        let mut freqs = [0u32; NUM_SYMBOLS];
        let mut total = 0;

        for (symbol, slot) in freqs.iter_mut().enumerate() {
            let magnitude = from_symbol(symbol).unsigned_abs() as f64;
            let weight = if symbol == ESCAPE_SYMBOL {
                1
            } else {
                ((scale / (magnitude + 1.0).powf(exponent)) as u32).max(1)
            };
            *slot = weight;
            total += weight;
        }

        let mut ctx = ContextFreqs { freqs, total };
        ctx.rescale();
        ctx
    }

    pub fn freqs(&self) -> &[u32; NUM_SYMBOLS] {
        &self.freqs
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Sum of the frequencies below `symbol`.
    pub fn cumulative(&self, symbol: usize) -> u32 {
        self.freqs[..symbol].iter().sum()
    }

    /// Find the symbol whose interval contains `value`, returning `(symbol, cum, freq)`.
    ///
    /// A value at or beyond the total (only possible on a corrupt stream) matches no
    /// interval. It decodes as symbol 0 with `cum` equal to the total, and the decoder's
    /// wrapping update carries on from there.
    pub fn lookup(&self, value: u32) -> (usize, u32, u32) {
        let mut cum = 0;
        for (symbol, &freq) in self.freqs.iter().enumerate() {
            if value < cum + freq {
                return (symbol, cum, freq);
            }
            cum += freq;
        }
        (0, cum, self.freqs[0])
    }

    fn update(&mut self, symbol: usize) {
        self.bump(symbol, INC_MAIN);
        if symbol != ESCAPE_SYMBOL {
            if symbol > 0 {
                self.bump(symbol - 1, INC_SIDE);
            }
            if symbol < ESCAPE_SYMBOL - 1 {
                self.bump(symbol + 1, INC_SIDE);
            }
        }
        self.rescale();
    }

    fn bump(&mut self, symbol: usize, amount: u32) {
        self.freqs[symbol] += amount;
        self.total += amount;
    }

    /// Halve every slot (rounding up) until the total is back under the ceiling.
    fn rescale(&mut self) {
        while self.total >= MAX_TOTAL {
            self.total = 0;
            for freq in self.freqs.iter_mut() {
                *freq = (*freq + 1) >> 1;
                self.total += *freq;
            }
        }
    }
}

/// The four-context adaptive model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbabilityModel {
    contexts: [ContextFreqs; NUM_CONTEXTS],
}

impl ProbabilityModel {
    pub fn new() -> Self {
        ProbabilityModel {
            contexts: CONTEXT_CURVES.map(|(scale, exponent)| ContextFreqs::seeded(scale, exponent)),
        }
    }

    pub fn context(&self, ctx: usize) -> &ContextFreqs {
        &self.contexts[ctx]
    }

    pub fn total(&self, ctx: usize) -> u32 {
        self.contexts[ctx].total
    }

    pub fn freq(&self, ctx: usize, symbol: usize) -> u32 {
        self.contexts[ctx].freqs[symbol]
    }

    /// Record one occurrence of `symbol` in `ctx`.
    pub fn update(&mut self, ctx: usize, symbol: usize) {
        self.contexts[ctx].update(symbol);
    }
}

impl Default for ProbabilityModel {
    fn default() -> Self {
        Self::new()
    }
}
