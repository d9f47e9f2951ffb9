/// PCM stream parameters and their validation.

use thiserror::Error;

/// Sample rates the codec engine accepts, in Hz.
pub const SAMPLE_RATES: [u32; 6] = [8000, 16000, 24000, 32000, 44100, 48000];

/// Supported sample widths, in bits.
pub const SAMPLE_BITS: [u32; 4] = [8, 16, 24, 32];

/// Supported interleaved channel counts.
pub const CHANNEL_COUNTS: [u32; 4] = [1, 2, 4, 8];

/// Duration of one codec chunk in milliseconds.
pub const CHUNK_MS: u32 = 20;

/// A sample rate, bit depth, or channel count outside the supported sets.
/// Detected when an encoder or decoder is built, never during streaming.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InvalidFormat {
    #[error("invalid sample rate {0}: only 8000/16000/24000/32000/44100/48000 are supported")]
    SampleRate(u32),
    #[error("invalid sample bits {0}: only 8/16/24/32 are supported")]
    SampleBits(u32),
    #[error("invalid channel count {0}: only 1/2/4/8 are supported")]
    ChannelCount(u32),
}

/// Shape of a raw PCM stream: consecutive little-endian samples of
/// `sample_bits` width with `channel_count` interleaved channels.
///
/// Immutable once an encoder is built; every instance is valid by
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleFormat {
    sample_rate: u32,
    sample_bits: u32,
    channel_count: u32,
}

impl SampleFormat {
    /// Validate the fields against the supported sets.
    pub fn new(sample_rate: u32, sample_bits: u32, channel_count: u32) -> Result<Self, InvalidFormat> {
        check_sample_rate(sample_rate)?;
        if !SAMPLE_BITS.contains(&sample_bits) {
            return Err(InvalidFormat::SampleBits(sample_bits));
        }
        if !CHANNEL_COUNTS.contains(&channel_count) {
            return Err(InvalidFormat::ChannelCount(channel_count));
        }
        Ok(SampleFormat {
            sample_rate,
            sample_bits,
            channel_count,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn sample_bits(&self) -> u32 {
        self.sample_bits
    }

    pub fn channel_count(&self) -> u32 {
        self.channel_count
    }

    /// Bytes in one 20 ms chunk of this format, the encoder's window size.
    pub fn bytes_per_chunk(&self) -> usize {
        (self.sample_rate * self.channel_count * self.sample_bits / 8) as usize / 50
    }

    /// Samples the engine consumes per 20 ms packet.
    pub fn chunk_samples(&self) -> usize {
        (CHUNK_MS * self.sample_rate / 1000) as usize
    }
}

/// Validate a bare sample rate. The decoder is configured by rate alone.
pub fn check_sample_rate(sample_rate: u32) -> Result<(), InvalidFormat> {
    if SAMPLE_RATES.contains(&sample_rate) {
        Ok(())
    } else {
        Err(InvalidFormat::SampleRate(sample_rate))
    }
}
