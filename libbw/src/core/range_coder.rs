//! Byte-oriented range coder with carry propagation.
//!
//! Each coded event is a triple `(cumulative, frequency, total)` with
//! `cumulative + frequency <= total < 2^24` and `frequency >= 1`. The encoder keeps a
//! 33-bit `low` so a carry out of the top byte can be detected, holds the most recent
//! undecided byte in `cache` and counts the `0xFF` bytes behind it that a later carry
//! would still flip.

/// `range` is renormalized whenever it drops below this
pub const TOP: u32 = 1 << 24;

/// bytes shifted through `low` by a flush, and bytes the decoder primes `code` with
pub const FLUSH_ROUNDS: usize = 5;

/// total used for raw bytes, each one equiprobable
pub const RAW_BYTE_TOTAL: u32 = 256;

/// Range encoder writing into a growable buffer.
#[derive(Debug, Clone)]
pub struct RangeEncoder {
    buffer: Vec<u8>,
    low: u64,
    range: u32,
    /// byte waiting to learn whether a carry reaches it
    cache: u8,
    /// deferred 0xFF bytes following `cache`
    pending_ff: u32,
}

impl RangeEncoder {
    pub fn new() -> Self {
        RangeEncoder {
            buffer: Vec::new(),
            low: 0,
            range: u32::MAX,
            cache: 0,
            pending_ff: 0,
        }
    }

    /// Narrow the interval to `[cum, cum + freq)` out of `total`.
    pub fn encode(&mut self, cum: u32, freq: u32, total: u32) {
        debug_assert!(freq > 0, "zero-frequency symbol");
        debug_assert!(cum + freq <= total && total < TOP, "bad interval");

        let r = self.range / total;
        self.low += cum as u64 * r as u64;
        self.range = freq * r;

        while self.range < TOP {
            self.shift_low();
            self.range <<= 8;
        }
    }

    /// Code one byte with the flat 1-of-256 distribution.
    pub fn encode_raw_byte(&mut self, byte: u8) {
        self.encode(byte as u32, 1, RAW_BYTE_TOTAL);
    }

    /// Bytes emitted so far (not counting what a flush will add).
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Drain all pending state and return the finished payload.
    pub fn finish(mut self) -> Vec<u8> {
        for _ in 0..FLUSH_ROUNDS {
            self.shift_low();
        }
        self.buffer.push(self.cache);
        for _ in 0..self.pending_ff {
            self.buffer.push(0xFF);
        }
        self.buffer
    }

    fn shift_low(&mut self) {
        if self.low >> 24 != 0xFF {
            // top byte is settled (or a carry just settled it)
            let carry = (self.low >> 32) as u8;
            self.buffer.push(self.cache.wrapping_add(carry));
            for _ in 0..self.pending_ff {
                self.buffer.push(0xFFu8.wrapping_add(carry));
            }
            self.pending_ff = 0;
            self.cache = (self.low >> 24) as u8;
        } else {
            self.pending_ff += 1;
        }
        self.low = (self.low & 0x00FF_FFFF) << 8;
    }
}

impl Default for RangeEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Range decoder over a borrowed payload.
///
/// Reads past the end of the payload yield zero bytes, so a truncated stream still
/// decodes (with degraded output) instead of failing.
#[derive(Debug, Clone)]
pub struct RangeDecoder<'a> {
    data: &'a [u8],
    pos: usize,
    range: u32,
    code: u32,
}

impl<'a> RangeDecoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        let mut decoder = RangeDecoder {
            data,
            pos: 0,
            range: u32::MAX,
            code: 0,
        };
        // the first byte is the encoder's initial cache and falls off the top
        for _ in 0..FLUSH_ROUNDS {
            decoder.code = (decoder.code << 8) | decoder.next_byte() as u32;
        }
        decoder
    }

    /// Scale the range by `total` and return the value used to locate the symbol.
    ///
    /// Must be followed by [`RangeDecoder::update`]. The result is only guaranteed to be
    /// below `total` for a well-formed stream.
    pub fn get_freq(&mut self, total: u32) -> u32 {
        self.range /= total;
        self.code / self.range
    }

    /// Consume the symbol occupying `[cum, cum + freq)`.
    pub fn update(&mut self, cum: u32, freq: u32) {
        self.code = self.code.wrapping_sub(cum.wrapping_mul(self.range));
        self.range = self.range.wrapping_mul(freq);

        while self.range < TOP {
            self.code = (self.code << 8) | self.next_byte() as u32;
            self.range <<= 8;
        }
    }

    /// Decode one byte coded with [`RangeEncoder::encode_raw_byte`].
    pub fn decode_raw_byte(&mut self) -> u8 {
        self.decode_raw() as u8
    }

    /// Like [`RangeDecoder::decode_raw_byte`] but without narrowing.
    ///
    /// On a corrupt stream the value can exceed 255; it is consumed as is.
    pub fn decode_raw(&mut self) -> u32 {
        let value = self.get_freq(RAW_BYTE_TOTAL);
        self.update(value, 1);
        value
    }

    /// How many zero bytes have been synthesized past the end of the payload.
    pub fn overrun(&self) -> usize {
        self.pos.saturating_sub(self.data.len())
    }

    fn next_byte(&mut self) -> u8 {
        let byte = self.data.get(self.pos).copied().unwrap_or(0);
        self.pos += 1;
        byte
    }
}
