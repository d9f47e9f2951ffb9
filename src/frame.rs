/// Length-prefixed frame unit of the SILK container.
///
/// A container is the 9-byte magic marker followed by frames laid out
/// back-to-back, each a 2-byte little-endian payload length and that many
/// payload bytes. There is no trailer, checksum, or frame count; consumers
/// read until end of input.

use thiserror::Error;

/// Magic marker at the start of every container. Exactly 9 ASCII bytes,
/// no trailing null.
pub const SILK_HEADER: &[u8; 9] = b"#!SILK_V3";

/// Largest payload one frame can carry; the length prefix is a u16.
pub const MAX_PAYLOAD: usize = u16::MAX as usize;

/// A codec-engine payload too large for the 16-bit length prefix. Such a
/// payload is never truncated; the whole encode call fails instead.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("frame payload of {0} bytes exceeds the 16-bit length prefix (max {MAX_PAYLOAD})")]
pub struct PayloadTooLarge(pub usize);

/// Outcome of reading one frame out of a buffer.
#[derive(Debug, PartialEq, Eq)]
pub enum ReadFrame<'a> {
    /// A complete frame; `next` is the offset just past its payload.
    Frame { payload: &'a [u8], next: usize },
    /// Fewer than `2 + length` bytes remain from the offset. This is a
    /// recoverable streaming condition, not an error: callers buffer and
    /// retry once more bytes arrive, or stop cleanly at end of input.
    Incomplete,
}

/// Append one length-prefixed frame to `out`.
pub fn write_frame(payload: &[u8], out: &mut Vec<u8>) -> Result<(), PayloadTooLarge> {
    if payload.len() > MAX_PAYLOAD {
        return Err(PayloadTooLarge(payload.len()));
    }
    out.extend_from_slice(&(payload.len() as u16).to_le_bytes());
    out.extend_from_slice(payload);
    Ok(())
}

/// Read one frame starting at `offset`.
pub fn read_frame(buf: &[u8], offset: usize) -> ReadFrame<'_> {
    if buf.len() < offset + 2 {
        return ReadFrame::Incomplete;
    }
    let len = u16::from_le_bytes([buf[offset], buf[offset + 1]]) as usize;
    let start = offset + 2;
    if buf.len() < start + len {
        return ReadFrame::Incomplete;
    }
    ReadFrame::Frame {
        payload: &buf[start..start + len],
        next: start + len,
    }
}
