/// Streaming PCM → SILK container encoder.

use std::io::{Read, Write};

use crate::endian;
use crate::engine::{EncodeParams, EncoderEngine};
use crate::format::SampleFormat;
use crate::frame::{self, SILK_HEADER};
use crate::{read_full, EncodeError};

/// Default encoding bit rate in bits per second. Roughly 13x compression
/// with the reference engine at 16 kHz; callers tune it per stream.
pub const DEFAULT_BIT_RATE: u32 = 10000;

/// Chunks buffered per read in [`SilkEncoder::encode_stream`]:
/// 1000 x 20 ms, about 20 seconds of audio.
const CHUNKS_PER_READ: usize = 1000;

/// Encoder for a fixed sample format.
///
/// Owns one codec engine instance for its lifetime; the engine state is
/// released on drop. Instances are not shareable across threads while in
/// use: build one encoder per concurrent stream.
#[derive(Debug)]
pub struct SilkEncoder<E> {
    engine: E,
    format: SampleFormat,
}

impl<E: EncoderEngine> SilkEncoder<E> {
    /// Build an encoder for `format`, allocating and initializing the codec
    /// engine state.
    pub fn init(format: SampleFormat) -> Result<Self, EncodeError> {
        let engine = E::create().map_err(EncodeError::EngineInit)?;
        log::debug!(
            "encoder init: sample_rate={} sample_bits={} channel_count={}",
            format.sample_rate(),
            format.sample_bits(),
            format.channel_count()
        );
        Ok(SilkEncoder { engine, format })
    }

    /// Wrap an already-built engine. Lets tests inject instrumented engines.
    pub fn with_engine(engine: E, format: SampleFormat) -> Self {
        SilkEncoder { engine, format }
    }

    pub fn format(&self) -> &SampleFormat {
        &self.format
    }

    fn params(&self, bit_rate: u32) -> EncodeParams {
        EncodeParams {
            api_sample_rate: self.format.sample_rate(),
            max_internal_sample_rate: self.format.sample_rate(),
            packet_size_samples: self.format.chunk_samples(),
            complexity: 2,
            packet_loss_pct: 0,
            use_fec: false,
            use_dtx: false,
            bit_rate,
        }
    }

    /// Encode `pcm` into length-prefixed frames appended to `out`.
    ///
    /// The input is consumed in consecutive 20 ms windows. A trailing
    /// window shorter than [`SampleFormat::bytes_per_chunk`] is dropped,
    /// never buffered across calls or padded; callers who need the tail
    /// encoded must pad it themselves. On an engine error the call aborts
    /// with the engine's code; frames already appended to `out` remain
    /// complete and valid.
    pub fn encode(&mut self, pcm: &[u8], bit_rate: u32, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        let params = self.params(bit_rate);

        for window in pcm.chunks_exact(self.format.bytes_per_chunk()) {
            let samples = endian::samples_from_wire(window);
            let payload = self.engine.encode_chunk(&params, &samples).map_err(|e| {
                log::warn!("engine rejected a chunk: {e}");
                EncodeError::Engine(e)
            })?;
            frame::write_frame(&payload, out)?;
        }
        Ok(())
    }

    /// Encode a whole PCM stream into a SILK container written to `writer`.
    ///
    /// The container header is written exactly once, before the first
    /// frame. Input is pulled in buffers of 1000 chunks, filled completely
    /// except at end of input, so only the final partial chunk of the
    /// stream is ever dropped. The first error stops the
    /// call; everything already written is a well-formed container prefix.
    pub fn encode_stream<R: Read, W: Write>(
        &mut self,
        reader: &mut R,
        writer: &mut W,
        bit_rate: u32,
    ) -> Result<(), EncodeError> {
        writer.write_all(SILK_HEADER)?;

        let buf_size = CHUNKS_PER_READ * self.format.bytes_per_chunk();
        let mut buf = vec![0u8; buf_size];
        let mut silk = Vec::new();
        loop {
            let n = read_full(reader, &mut buf)?;
            if n == 0 {
                break;
            }
            silk.clear();
            self.encode(&buf[..n], bit_rate, &mut silk)?;
            writer.write_all(&silk)?;
            if n < buf_size {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::io::Cursor;
    use std::rc::Rc;

    use super::*;
    use crate::engine::{EngineError, PassthroughEngine};
    use crate::frame::ReadFrame;

    fn format_8k_mono() -> SampleFormat {
        SampleFormat::new(8000, 16, 1).unwrap()
    }

    fn count_frames(silk: &[u8]) -> usize {
        let mut offset = 0;
        let mut frames = 0;
        while let ReadFrame::Frame { next, .. } = frame::read_frame(silk, offset) {
            offset = next;
            frames += 1;
        }
        assert_eq!(offset, silk.len(), "no stray bytes after the last frame");
        frames
    }

    /// Fails every call after the first `ok_chunks`.
    struct FailAfter {
        ok_chunks: usize,
        seen: usize,
    }

    impl EncoderEngine for FailAfter {
        fn create() -> Result<Self, EngineError> {
            Ok(FailAfter { ok_chunks: 0, seen: 0 })
        }

        fn encode_chunk(&mut self, _params: &EncodeParams, samples: &[i16]) -> Result<Vec<u8>, EngineError> {
            self.seen += 1;
            if self.seen > self.ok_chunks {
                return Err(EngineError(-7));
            }
            let mut payload = Vec::new();
            endian::samples_to_wire(samples, &mut payload);
            Ok(payload)
        }
    }

    /// Produces a payload that cannot fit the 16-bit length prefix.
    struct Oversize;

    impl EncoderEngine for Oversize {
        fn create() -> Result<Self, EngineError> {
            Ok(Oversize)
        }

        fn encode_chunk(&mut self, _params: &EncodeParams, _samples: &[i16]) -> Result<Vec<u8>, EngineError> {
            Ok(vec![0u8; frame::MAX_PAYLOAD + 1])
        }
    }

    /// Refuses to initialize.
    #[derive(Debug)]
    struct Unbuildable;

    impl EncoderEngine for Unbuildable {
        fn create() -> Result<Self, EngineError> {
            Err(EngineError(3))
        }

        fn encode_chunk(&mut self, _params: &EncodeParams, _samples: &[i16]) -> Result<Vec<u8>, EngineError> {
            unreachable!("never constructed")
        }
    }

    /// Records the parameter block it was handed.
    struct ParamSpy {
        bit_rate: Rc<Cell<u32>>,
        packet_size: Rc<Cell<usize>>,
    }

    impl EncoderEngine for ParamSpy {
        fn create() -> Result<Self, EngineError> {
            Ok(ParamSpy {
                bit_rate: Rc::default(),
                packet_size: Rc::default(),
            })
        }

        fn encode_chunk(&mut self, params: &EncodeParams, _samples: &[i16]) -> Result<Vec<u8>, EngineError> {
            self.bit_rate.set(params.bit_rate);
            self.packet_size.set(params.packet_size_samples);
            Ok(vec![0u8; 4])
        }
    }

    #[test]
    fn test_encode_drops_trailing_partial_window() {
        let format = format_8k_mono();
        let mut encoder = SilkEncoder::<PassthroughEngine>::init(format).unwrap();

        // Two full 320-byte chunks plus 10 stray bytes.
        let pcm = vec![0x11u8; 650];
        let mut silk = Vec::new();
        encoder.encode(&pcm, DEFAULT_BIT_RATE, &mut silk).unwrap();

        assert_eq!(count_frames(&silk), 2);
        // Each frame is 2 bytes of prefix plus one chunk of payload.
        assert_eq!(silk.len(), 2 * (2 + 320));
    }

    #[test]
    fn test_encode_empty_input_produces_no_frames() {
        let mut encoder = SilkEncoder::<PassthroughEngine>::init(format_8k_mono()).unwrap();
        let mut silk = Vec::new();
        encoder.encode(&[], DEFAULT_BIT_RATE, &mut silk).unwrap();
        assert!(silk.is_empty());
    }

    #[test]
    fn test_engine_failure_aborts_and_keeps_prior_frames() {
        let engine = FailAfter { ok_chunks: 1, seen: 0 };
        let mut encoder = SilkEncoder::with_engine(engine, format_8k_mono());

        let pcm = vec![0u8; 320 * 3];
        let mut silk = Vec::new();
        let err = encoder.encode(&pcm, DEFAULT_BIT_RATE, &mut silk).unwrap_err();

        assert!(matches!(err, EncodeError::Engine(EngineError(-7))));
        // The frame encoded before the failure is complete and not rolled back.
        assert_eq!(count_frames(&silk), 1);
    }

    #[test]
    fn test_oversized_engine_payload_is_an_error() {
        let mut encoder = SilkEncoder::with_engine(Oversize, format_8k_mono());
        let pcm = vec![0u8; 320];
        let mut silk = Vec::new();
        let err = encoder.encode(&pcm, DEFAULT_BIT_RATE, &mut silk).unwrap_err();
        assert!(matches!(err, EncodeError::PayloadTooLarge(_)));
        assert!(silk.is_empty());
    }

    #[test]
    fn test_init_propagates_engine_creation_failure() {
        let err = SilkEncoder::<Unbuildable>::init(format_8k_mono()).unwrap_err();
        assert!(matches!(err, EncodeError::EngineInit(EngineError(3))));
    }

    #[test]
    fn test_engine_receives_fixed_parameter_block() {
        let engine = <ParamSpy as EncoderEngine>::create().unwrap();
        let bit_rate = Rc::clone(&engine.bit_rate);
        let packet_size = Rc::clone(&engine.packet_size);

        let format = SampleFormat::new(24000, 16, 1).unwrap();
        let mut encoder = SilkEncoder::with_engine(engine, format);
        let mut silk = Vec::new();
        encoder
            .encode(&vec![0u8; format.bytes_per_chunk()], 25000, &mut silk)
            .unwrap();

        assert_eq!(bit_rate.get(), 25000);
        assert_eq!(packet_size.get(), 480); // 20 ms at 24 kHz
    }

    #[test]
    fn test_encode_stream_writes_header_once() {
        let mut encoder = SilkEncoder::<PassthroughEngine>::init(format_8k_mono()).unwrap();

        let pcm = vec![0x22u8; 320 * 4];
        let mut reader = Cursor::new(pcm);
        let mut container = Vec::new();
        encoder
            .encode_stream(&mut reader, &mut container, DEFAULT_BIT_RATE)
            .unwrap();

        assert_eq!(&container[..9], SILK_HEADER);
        assert_eq!(count_frames(&container[9..]), 4);
    }

    #[test]
    fn test_encode_stream_empty_input_is_header_only() {
        let mut encoder = SilkEncoder::<PassthroughEngine>::init(format_8k_mono()).unwrap();
        let mut reader = Cursor::new(Vec::new());
        let mut container = Vec::new();
        encoder
            .encode_stream(&mut reader, &mut container, DEFAULT_BIT_RATE)
            .unwrap();
        assert_eq!(container, SILK_HEADER);
    }
}
