use bytes::{BufMut, Bytes, BytesMut};
use pbdns_exporter_domain::{FramingError, PrefixWidth};
use std::io;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Reads `[length][payload]` frames from a byte stream.
///
/// The length is a big-endian unsigned integer of a fixed width. Partial
/// reads are looped over until the advertised size arrives or the peer
/// closes the stream.
pub struct FrameReader<R> {
    reader: R,
    width: PrefixWidth,
    max_frame_size: usize,
}

impl<R: AsyncRead + Unpin> FrameReader<R> {
    pub fn new(reader: R, width: PrefixWidth, max_frame_size: usize) -> Self {
        Self {
            reader,
            width,
            max_frame_size,
        }
    }

    /// Next payload, or `None` when the peer closed exactly on a frame
    /// boundary.
    pub async fn next_frame(&mut self) -> Result<Option<Bytes>, FramingError> {
        let expected = self.width.byte_len();
        let mut prefix = [0u8; 4];

        let received = read_full(&mut self.reader, &mut prefix[..expected])
            .await
            .map_err(FramingError::PrefixRead)?;

        if received == 0 {
            return Ok(None);
        }
        if received < expected {
            return Err(FramingError::TruncatedPrefix { expected, received });
        }

        let len = match self.width {
            PrefixWidth::U16 => u16::from_be_bytes([prefix[0], prefix[1]]) as usize,
            PrefixWidth::U32 => u32::from_be_bytes(prefix) as usize,
        };

        // Checked before allocating so a hostile prefix cannot reserve gigabytes.
        if len > self.max_frame_size {
            return Err(FramingError::FrameTooLarge {
                len,
                max: self.max_frame_size,
            });
        }

        let mut payload = BytesMut::zeroed(len);
        let received = read_full(&mut self.reader, &mut payload)
            .await
            .map_err(FramingError::PayloadRead)?;

        if received < len {
            return Err(FramingError::ShortRead {
                expected: len,
                received,
            });
        }

        Ok(Some(payload.freeze()))
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

/// Fills `buf` unless EOF comes first; returns how many bytes arrived.
async fn read_full<R: AsyncRead + Unpin>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;

    while filled < buf.len() {
        match reader.read(&mut buf[filled..]).await {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(filled)
}

/// Prefixes `payload` with its length in the given width.
pub fn encode_frame(payload: &[u8], width: PrefixWidth) -> Result<Bytes, FramingError> {
    if payload.len() > width.max_len() {
        return Err(FramingError::FrameTooLarge {
            len: payload.len(),
            max: width.max_len(),
        });
    }

    let mut frame = BytesMut::with_capacity(width.byte_len() + payload.len());
    match width {
        PrefixWidth::U16 => frame.put_u16(payload.len() as u16),
        PrefixWidth::U32 => frame.put_u32(payload.len() as u32),
    }
    frame.put_slice(payload);

    Ok(frame.freeze())
}
