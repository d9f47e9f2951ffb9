//! SILK v3 container framing and streaming codec pipeline.
//!
//! A container is the 9-byte `#!SILK_V3` marker followed by compressed
//! frames, each prefixed by a 2-byte little-endian payload length. This
//! crate chunks continuous PCM into fixed 20 ms windows, drives an opaque
//! codec engine over them, and frames the results — and the inverse on
//! decode, with defensive handling of truncated or corrupt streams. The
//! codec algorithm itself sits behind the [`EncoderEngine`] /
//! [`DecoderEngine`] traits.

pub mod decoder;
pub mod encoder;
pub mod endian;
pub mod engine;
pub mod format;
pub mod frame;
#[cfg(feature = "python")]
mod python;

pub use decoder::{SilkDecoder, MAX_INPUT_FRAMES};
pub use encoder::{SilkEncoder, DEFAULT_BIT_RATE};
pub use engine::{
    DecodeParams, DecodedChunk, DecoderEngine, EncodeParams, EncoderEngine, EngineError,
    PassthroughEngine,
};
pub use format::{InvalidFormat, SampleFormat};
pub use frame::{PayloadTooLarge, ReadFrame, MAX_PAYLOAD, SILK_HEADER};

use std::io::{self, Read};

use thiserror::Error;

/// Errors from building an encoder or encoding a stream.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Sample rate, bit depth, or channel count outside the supported sets.
    #[error(transparent)]
    InvalidFormat(#[from] InvalidFormat),
    /// The codec engine could not report its size or failed to initialize;
    /// no encoder instance is created.
    #[error("codec engine failed to initialize: {0}")]
    EngineInit(#[source] EngineError),
    /// The engine rejected a chunk. The call aborts; frames already
    /// written are not rolled back.
    #[error("codec engine failed to encode a chunk: {0}")]
    Engine(#[source] EngineError),
    /// An engine payload exceeded the 16-bit length-prefix capacity.
    #[error(transparent)]
    PayloadTooLarge(#[from] PayloadTooLarge),
    /// Source or sink I/O failure; surfaced as-is, never retried.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Errors from building a decoder or decoding a stream.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Sample rate outside the supported set.
    #[error(transparent)]
    InvalidFormat(#[from] InvalidFormat),
    /// The codec engine could not report its size or failed to initialize;
    /// no decoder instance is created.
    #[error("codec engine failed to initialize: {0}")]
    EngineInit(#[source] EngineError),
    /// The engine rejected a frame payload. The call aborts; PCM already
    /// emitted is not rolled back.
    #[error("codec engine failed to decode a frame: {0}")]
    Engine(#[source] EngineError),
    /// The input does not start with the exact 9-byte container magic.
    #[error("input does not start with the #!SILK_V3 container header")]
    InvalidContainer,
    /// Source or sink I/O failure; surfaced as-is, never retried.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Fill `buf` from `reader`, returning short only at end of input.
pub(crate) fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = reader.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}
