//! WAV encoder for clip output.
//!
//! Encodes 16-bit little-endian mono PCM with the hound crate. hound writes
//! the canonical 44-byte RIFF/WAVE header with no extra chunks, so equal
//! samples always encode to equal bytes.

use std::io::Cursor;
use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::error::{CatalogError, ErrorCode, Result};

/// Size of the RIFF + fmt + data chunk headers.
pub const WAV_HEADER_LEN: usize = 44;

/// Number of audio channels (mono).
pub const CHANNELS: u16 = 1;

const BITS_PER_SAMPLE: u16 = 16;

fn encode_failed(e: hound::Error) -> CatalogError {
    CatalogError::with_source(
        ErrorCode::OutputFailed,
        format!("Failed to encode WAV: {}", e),
        e,
    )
}

/// Encodes 16-bit mono samples into a complete in-memory WAV file.
///
/// Samples must already be quantized; the encoder does no clipping or
/// conversion.
pub fn encode_wav(samples: &[i16], sample_rate: u32) -> Result<Vec<u8>> {
    let spec = WavSpec {
        channels: CHANNELS,
        sample_rate,
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::with_capacity(WAV_HEADER_LEN + samples.len() * 2));
    {
        let mut writer = WavWriter::new(&mut cursor, spec).map_err(encode_failed)?;
        for sample in samples {
            writer.write_sample(*sample).map_err(encode_failed)?;
        }
        writer.finalize().map_err(encode_failed)?;
    }

    Ok(cursor.into_inner())
}

/// Writes WAV bytes to a file, creating parent directories as needed.
pub fn write_wav(bytes: &[u8], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| CatalogError::output_failed(parent, e))?;
    }
    std::fs::write(path, bytes).map_err(|e| CatalogError::output_failed(path, e))
}

/// Calculates the duration of audio in seconds from sample count.
pub fn samples_to_duration(sample_count: usize, sample_rate: u32) -> f32 {
    sample_count as f32 / sample_rate as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SAMPLE_RATE;
    use tempfile::tempdir;

    fn u32_at(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    fn u16_at(bytes: &[u8], offset: usize) -> u16 {
        u16::from_le_bytes(bytes[offset..offset + 2].try_into().unwrap())
    }

    #[test]
    fn one_second_header_layout() {
        let samples = vec![0i16; SAMPLE_RATE as usize];
        let bytes = encode_wav(&samples, SAMPLE_RATE).unwrap();

        assert_eq!(bytes.len(), 88_244);
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(u32_at(&bytes, 4), 36 + 88_200);
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(&bytes[12..16], b"fmt ");
        assert_eq!(u32_at(&bytes, 16), 16);
        assert_eq!(u16_at(&bytes, 20), 1);
        assert_eq!(u16_at(&bytes, 22), 1);
        assert_eq!(u32_at(&bytes, 24), 44_100);
        assert_eq!(u32_at(&bytes, 28), 88_200);
        assert_eq!(u16_at(&bytes, 32), 2);
        assert_eq!(u16_at(&bytes, 34), 16);
        assert_eq!(&bytes[36..40], b"data");
        assert_eq!(u32_at(&bytes, 40), 88_200);
    }

    #[test]
    fn samples_are_little_endian() {
        let bytes = encode_wav(&[1, -2, i16::MAX], 8000).unwrap();
        assert_eq!(&bytes[44..], &[0x01, 0x00, 0xFE, 0xFF, 0xFF, 0x7F]);
    }

    #[test]
    fn hound_reads_encoded_samples() {
        let samples: Vec<i16> = (0..1000).map(|i| ((i * 37) % 2000 - 1000) as i16).collect();
        let bytes = encode_wav(&samples, SAMPLE_RATE).unwrap();

        let reader = hound::WavReader::new(std::io::Cursor::new(bytes)).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, CHANNELS);
        assert_eq!(spec.sample_rate, SAMPLE_RATE);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(spec.sample_format, hound::SampleFormat::Int);

        let decoded: Vec<i16> = reader.into_samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(decoded, samples);
    }

    #[test]
    fn synthesized_clip_header_matches_length() {
        let pcm = crate::audio::synthesize(&mut crate::rng::derive_stream(crate::rng::Seed::from(1), 1001), 1);
        let bytes = pcm.to_wav().unwrap();
        assert_eq!(bytes.len(), WAV_HEADER_LEN + pcm.len() * 2);
        assert_eq!(u32_at(&bytes, 40) as usize, pcm.len() * 2);
        assert_eq!(u32_at(&bytes, 4) as usize, bytes.len() - 8);
    }

    #[test]
    fn empty_buffer_is_header_only() {
        let bytes = encode_wav(&[], SAMPLE_RATE).unwrap();
        assert_eq!(bytes.len(), WAV_HEADER_LEN);
        assert_eq!(u32_at(&bytes, 40), 0);
    }

    #[test]
    fn write_wav_creates_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("clip.wav");
        let bytes = encode_wav(&[0, 1, 2], SAMPLE_RATE).unwrap();

        write_wav(&bytes, &path).unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), bytes);
    }

    #[test]
    fn samples_to_duration_calculation() {
        assert_eq!(samples_to_duration(44_100, 44_100), 1.0);
        assert_eq!(samples_to_duration(22_050, 44_100), 0.5);
    }
}
