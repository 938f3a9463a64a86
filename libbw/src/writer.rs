use crate::core::{format_error, BwResult, HEADER_SIZE};

/// binary writer for bw format
pub struct Writer {
    buffer: Vec<u8>,
}

impl Writer {
    /// new writer
    pub fn new() -> Self {
        Writer { buffer: Vec::new() }
    }

    /// write a complete bw file: 12-byte header then the payload
    pub fn write(mut self, sample_rate: u32, sample_count: usize, payload: &[u8]) -> BwResult<Vec<u8>> {
        let sample_count = match u32::try_from(sample_count) {
            Ok(n) => n,
            Err(_) => return format_error("sample count does not fit in u32"),
        };
        let payload_len = match u32::try_from(payload.len()) {
            Ok(n) => n,
            Err(_) => return format_error("payload does not fit in u32"),
        };

        self.buffer.reserve(HEADER_SIZE + payload.len());

        // Sample count (u32 LE)
        self.buffer.extend_from_slice(&sample_count.to_le_bytes());
        // Sample rate (u32 LE)
        self.buffer.extend_from_slice(&sample_rate.to_le_bytes());
        // Payload length (u32 LE)
        self.buffer.extend_from_slice(&payload_len.to_le_bytes());

        self.buffer.extend_from_slice(payload);
        Ok(self.buffer)
    }
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}
