use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyByteArray;

use crate::{PassthroughEngine, SampleFormat, SilkDecoder, SilkEncoder, SILK_HEADER};

/// Encode raw PCM audio into a complete SILK container.
///
/// Takes raw PCM bytes (little-endian samples) and returns a bytearray
/// holding the container: the #!SILK_V3 header followed by length-prefixed
/// frames. PCM that does not fill a complete 20 ms chunk is discarded.
#[pyfunction]
#[pyo3(signature = (pcm_data, sample_rate=8000, sample_bits=16, channel_count=1, bit_rate=10000))]
fn encode<'py>(
    py: Python<'py>,
    pcm_data: &[u8],
    sample_rate: u32,
    sample_bits: u32,
    channel_count: u32,
    bit_rate: u32,
) -> PyResult<Bound<'py, PyByteArray>> {
    let format = SampleFormat::new(sample_rate, sample_bits, channel_count)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    let mut encoder = SilkEncoder::<PassthroughEngine>::init(format)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    let mut container = Vec::with_capacity(SILK_HEADER.len() + pcm_data.len());
    container.extend_from_slice(SILK_HEADER);
    encoder
        .encode(pcm_data, bit_rate, &mut container)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    Ok(PyByteArray::new(py, &container))
}

/// Decode a complete SILK container to raw PCM audio.
///
/// Takes bytes holding a container (header + frames) and returns a
/// bytearray of little-endian PCM samples. A truncated trailing frame is
/// dropped silently.
#[pyfunction]
#[pyo3(signature = (silk_data, sample_rate=8000))]
fn decode<'py>(py: Python<'py>, silk_data: &[u8], sample_rate: u32) -> PyResult<Bound<'py, PyByteArray>> {
    let mut decoder = SilkDecoder::<PassthroughEngine>::init(sample_rate)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    let mut pcm = Vec::new();
    decoder
        .decode_container(silk_data, &mut pcm)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    Ok(PyByteArray::new(py, &pcm))
}

/// SILK v3 container codec.
///
/// Frames 20 ms PCM chunks into the #!SILK_V3 container format and back.
///
/// Quick usage:
///     import silk_codec
///     silk_data = silk_codec.encode(pcm_bytes, sample_rate=8000)
///     pcm_bytes = silk_codec.decode(silk_data, sample_rate=8000)
#[pymodule]
fn silk_codec(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(encode, m)?)?;
    m.add_function(wrap_pyfunction!(decode, m)?)?;
    Ok(())
}
