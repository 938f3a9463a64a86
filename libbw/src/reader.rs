use log::warn;

use crate::core::{format_error, BwResult, CompressedFile, StreamHeader, HEADER_SIZE};

/// binary reader for bw format
pub struct Reader;

impl Reader {
    /// new reader
    pub fn new() -> Self {
        Reader
    }

    /// read and parse a bw file
    ///
    /// Only the header is mandatory. A payload shorter than declared is kept as is
    /// and trailing bytes past the declared length are dropped.
    pub fn read(&self, data: &[u8]) -> BwResult<CompressedFile> {
        let mut cursor = Cursor::new(data);

        // header
        let header = self.read_header(&mut cursor)?;

        // payload
        let declared = header.payload_len as usize;
        let payload = cursor.read_up_to(declared);
        if payload.len() < declared {
            warn!(
                "bw payload short: expected {} bytes, found {}",
                declared,
                payload.len()
            );
        }

        Ok(CompressedFile { header, payload })
    }

    /// parse only the fixed header
    pub fn read_header_only(&self, data: &[u8]) -> BwResult<StreamHeader> {
        self.read_header(&mut Cursor::new(data))
    }

    fn read_header(&self, cursor: &mut Cursor) -> BwResult<StreamHeader> {
        if cursor.remaining() < HEADER_SIZE {
            return format_error("file shorter than header");
        }

        Ok(StreamHeader {
            sample_count: cursor.read_u32_le()?,
            sample_rate: cursor.read_u32_le()?,
            payload_len: cursor.read_u32_le()?,
        })
    }
}

impl Default for Reader {
    fn default() -> Self {
        Self::new()
    }
}

// cursor helper

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Cursor { data, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_bytes(&mut self, count: usize) -> BwResult<&'a [u8]> {
        if count > self.remaining() {
            return format_error("unexpected end of file");
        }
        let bytes = &self.data[self.pos..self.pos + count];
        self.pos += count;
        Ok(bytes)
    }

    /// at most `count` bytes, fewer if the data runs out
    fn read_up_to(&mut self, count: usize) -> Vec<u8> {
        let end = self.pos + count.min(self.remaining());
        let bytes = self.data[self.pos..end].to_vec();
        self.pos = end;
        bytes
    }

    fn read_u32_le(&mut self) -> BwResult<u32> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}
