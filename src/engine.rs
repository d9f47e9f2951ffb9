/// Seam to the opaque speech codec engine.
///
/// The engine itself (entropy coding, linear prediction, noise shaping) is
/// an external collaborator. This crate only drives it: a chunk of samples
/// plus parameters goes in, a compressed payload comes out, and the reverse
/// on decode. Engine state is owned exclusively by one encoder or decoder
/// instance and released when that instance is dropped.

use thiserror::Error;

use crate::endian;

/// Failure reported by the codec engine, carrying its native return code.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("codec engine returned {0}")]
pub struct EngineError(pub i32);

/// Control parameters for encoding one chunk, mirroring the engine's
/// encoder control block.
#[derive(Debug, Clone, Copy)]
pub struct EncodeParams {
    pub api_sample_rate: u32,
    pub max_internal_sample_rate: u32,
    pub packet_size_samples: usize,
    pub complexity: u8,
    pub packet_loss_pct: u8,
    pub use_fec: bool,
    pub use_dtx: bool,
    pub bit_rate: u32,
}

/// Control parameters for decoding, mirroring the engine's decoder
/// control block.
#[derive(Debug, Clone, Copy)]
pub struct DecodeParams {
    pub api_sample_rate: u32,
}

/// Output of one engine decode call.
#[derive(Debug)]
pub struct DecodedChunk {
    /// Decoded samples in host order.
    pub samples: Vec<i16>,
    /// The engine holds further 20 ms sub-frames for the same payload and
    /// must be called again.
    pub more_frames_pending: bool,
}

/// Encode half of the engine.
///
/// `create` covers the engine's size query and state initialization in one
/// step; the returned value owns the engine state for the lifetime of one
/// encoder instance.
pub trait EncoderEngine {
    fn create() -> Result<Self, EngineError>
    where
        Self: Sized;

    /// Compress one 20 ms chunk of samples into an opaque payload.
    fn encode_chunk(&mut self, params: &EncodeParams, samples: &[i16]) -> Result<Vec<u8>, EngineError>;
}

/// Decode half of the engine.
pub trait DecoderEngine {
    fn create() -> Result<Self, EngineError>
    where
        Self: Sized;

    /// Decode one 20 ms sub-frame from `payload`.
    fn decode_chunk(&mut self, params: &DecodeParams, payload: &[u8]) -> Result<DecodedChunk, EngineError>;
}

/// Loopback engine: the "compressed" payload is the chunk's samples in wire
/// order, unmodified.
///
/// Keeps the whole framing pipeline exercisable without a native codec
/// library and backs the demo binary. With this engine a container decodes
/// back to the exact PCM bytes that were encoded.
#[derive(Debug, Default)]
pub struct PassthroughEngine;

impl EncoderEngine for PassthroughEngine {
    fn create() -> Result<Self, EngineError> {
        Ok(PassthroughEngine)
    }

    fn encode_chunk(&mut self, _params: &EncodeParams, samples: &[i16]) -> Result<Vec<u8>, EngineError> {
        let mut payload = Vec::new();
        endian::samples_to_wire(samples, &mut payload);
        Ok(payload)
    }
}

impl DecoderEngine for PassthroughEngine {
    fn create() -> Result<Self, EngineError> {
        Ok(PassthroughEngine)
    }

    fn decode_chunk(&mut self, _params: &DecodeParams, payload: &[u8]) -> Result<DecodedChunk, EngineError> {
        Ok(DecodedChunk {
            samples: endian::samples_from_wire(payload),
            more_frames_pending: false,
        })
    }
}
