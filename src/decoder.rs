/// SILK container → streaming PCM decoder.

use std::io::{Read, Write};

use crate::endian;
use crate::engine::{DecodeParams, DecoderEngine};
use crate::format;
use crate::frame::{self, ReadFrame, SILK_HEADER};
use crate::{read_full, DecodeError};

/// Upper bound on the 20 ms sub-frames one compressed payload may expand
/// into. A payload still reporting pending sub-frames after this many
/// engine calls is treated as corrupt: its accumulated output is discarded
/// entirely rather than emitted partially, and decoding continues with the
/// next frame.
pub const MAX_INPUT_FRAMES: usize = 5;

/// Decoder for a fixed output sample rate.
///
/// Owns one codec engine instance for its lifetime; the engine state is
/// released on drop. Build one decoder per concurrent stream.
#[derive(Debug)]
pub struct SilkDecoder<E> {
    engine: E,
    sample_rate: u32,
}

impl<E: DecoderEngine> SilkDecoder<E> {
    /// Build a decoder emitting PCM at `sample_rate`, allocating and
    /// initializing the codec engine state.
    pub fn init(sample_rate: u32) -> Result<Self, DecodeError> {
        format::check_sample_rate(sample_rate)?;
        let engine = E::create().map_err(DecodeError::EngineInit)?;
        log::debug!("decoder init: sample_rate={sample_rate}");
        Ok(SilkDecoder { engine, sample_rate })
    }

    /// Wrap an already-built engine. Lets tests inject instrumented engines.
    pub fn with_engine(engine: E, sample_rate: u32) -> Result<Self, DecodeError> {
        format::check_sample_rate(sample_rate)?;
        Ok(SilkDecoder { engine, sample_rate })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Decode one bare frame payload (no length prefix), appending
    /// wire-order PCM bytes to `out`.
    ///
    /// One payload may hold several 20 ms sub-frames, so the engine is
    /// called until it stops reporting more pending, at most
    /// [`MAX_INPUT_FRAMES`] times. Past that bound the payload is corrupt
    /// and its samples are dropped without error.
    pub fn decode_raw(&mut self, payload: &[u8], out: &mut Vec<u8>) -> Result<(), DecodeError> {
        let params = DecodeParams {
            api_sample_rate: self.sample_rate,
        };

        let mut samples: Vec<i16> = Vec::new();
        let mut finished = false;
        for _ in 0..MAX_INPUT_FRAMES {
            let chunk = self.engine.decode_chunk(&params, payload).map_err(|e| {
                log::warn!("engine rejected a payload: {e}");
                DecodeError::Engine(e)
            })?;
            samples.extend_from_slice(&chunk.samples);
            if !chunk.more_frames_pending {
                finished = true;
                break;
            }
        }
        if !finished {
            log::warn!(
                "payload still pending after {MAX_INPUT_FRAMES} sub-frames, dropping its output"
            );
            samples.clear();
        }

        endian::samples_to_wire(&samples, out);
        Ok(())
    }

    /// Decode a bare frame sequence (no container header), appending PCM
    /// bytes to `out`.
    ///
    /// Stops cleanly once fewer than 3 bytes remain — not enough for
    /// another prefixed frame — or the final frame is truncated. A
    /// truncated tail is dropped silently, matching the encoder's
    /// guarantee of never emitting a frame it could not fully flush.
    pub fn decode_frames(&mut self, silk: &[u8], out: &mut Vec<u8>) -> Result<(), DecodeError> {
        let mut offset = 0;
        while silk.len() - offset >= 3 {
            match frame::read_frame(silk, offset) {
                ReadFrame::Frame { payload, next } => {
                    self.decode_raw(payload, out)?;
                    offset = next;
                }
                ReadFrame::Incomplete => break,
            }
        }
        Ok(())
    }

    /// Decode a complete container: exact header check, then the frame
    /// sequence. A container with zero frames is valid empty audio.
    pub fn decode_container(&mut self, container: &[u8], out: &mut Vec<u8>) -> Result<(), DecodeError> {
        let Some(rest) = container.strip_prefix(SILK_HEADER) else {
            log::warn!("input does not start with the SILK v3 magic");
            return Err(DecodeError::InvalidContainer);
        };
        self.decode_frames(rest, out)
    }

    /// Decode a container incrementally from `reader`, writing PCM bytes
    /// to `writer`.
    ///
    /// A short read of a length prefix is a clean end of stream; a payload
    /// shorter than its prefix declares is dropped unprocessed, as in
    /// [`SilkDecoder::decode_frames`].
    pub fn decode_stream<R: Read, W: Write>(&mut self, reader: &mut R, writer: &mut W) -> Result<(), DecodeError> {
        let mut header = [0u8; SILK_HEADER.len()];
        if read_full(reader, &mut header)? != header.len() || header != *SILK_HEADER {
            log::warn!("input does not start with the SILK v3 magic");
            return Err(DecodeError::InvalidContainer);
        }

        let mut pcm = Vec::new();
        loop {
            let mut prefix = [0u8; 2];
            if read_full(reader, &mut prefix)? < prefix.len() {
                break;
            }
            let len = u16::from_le_bytes(prefix) as usize;
            let mut payload = vec![0u8; len];
            if read_full(reader, &mut payload)? < len {
                break;
            }

            pcm.clear();
            self.decode_raw(&payload, &mut pcm)?;
            writer.write_all(&pcm)?;
        }
        Ok(())
    }
}
