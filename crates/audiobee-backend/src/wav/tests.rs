//! Tests for the WAV writer module.

use std::io::Cursor;

use audiobee_spec::BackendError;

use crate::buffer::AudioBuffer;
use crate::error::RenderError;

use super::format::WavFormat;
use super::pcm::hash_pcm;
use super::result::WavResult;
use super::writer::{interleave_to_pcm16, write_wav_to_vec, HEADER_SIZE};

fn samples_to_pcm16(samples: &[f64]) -> Vec<u8> {
    interleave_to_pcm16(&[samples])
}

/// Locates the payload of the `data` chunk, walking word-aligned chunks.
fn extract_pcm_data(wav_data: &[u8]) -> Option<&[u8]> {
    if wav_data.len() < 12 || &wav_data[0..4] != b"RIFF" || &wav_data[8..12] != b"WAVE" {
        return None;
    }
    let mut pos = 12;
    while pos + 8 <= wav_data.len() {
        let size_bytes: [u8; 4] = wav_data[pos + 4..pos + 8].try_into().ok()?;
        let chunk_size = u32::from_le_bytes(size_bytes) as usize;
        if &wav_data[pos..pos + 4] == b"data" {
            return wav_data.get(pos + 8..pos + 8 + chunk_size);
        }
        pos += 8 + chunk_size + chunk_size % 2;
    }
    None
}

fn read_i16(pcm: &[u8], index: usize) -> i16 {
    i16::from_le_bytes([pcm[index * 2], pcm[index * 2 + 1]])
}

fn buffer_with(channels: &[&[f64]], sample_rate: u32) -> AudioBuffer {
    let length = channels.first().map_or(0, |c| c.len());
    let mut buffer = AudioBuffer::new(channels.len(), length, sample_rate);
    for (index, samples) in channels.iter().enumerate() {
        buffer
            .channel_data_mut(index)
            .unwrap()
            .copy_from_slice(samples);
    }
    buffer
}

// =========================================================================
// Format tests
// =========================================================================

#[test]
fn test_format_derived_sizes() {
    let mono = WavFormat::new(1, 44100);
    assert_eq!(mono.block_align(), Some(2));
    assert_eq!(mono.byte_rate(), Some(88200));

    let quad = WavFormat::new(4, 48000);
    assert_eq!(quad.bytes_per_sample(), 2);
    assert_eq!(quad.block_align(), Some(8));
    assert_eq!(quad.byte_rate(), Some(384000));
}

#[test]
fn test_format_sizes_that_overflow_the_header() {
    assert_eq!(WavFormat::new(32767, 8000).block_align(), Some(65534));
    assert_eq!(WavFormat::new(32768, 8000).block_align(), None);
    assert_eq!(WavFormat::new(40_000, 48_000).byte_rate(), None);
    // Frame fits, but the byte rate does not.
    assert_eq!(WavFormat::new(30_000, 96_000).block_align(), Some(60_000));
    assert_eq!(WavFormat::new(30_000, 96_000).byte_rate(), None);
}

#[test]
fn test_write_rejects_oversized_format() {
    let err = write_wav_to_vec(&WavFormat::new(40_000, 48_000), &[]).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
}

// =========================================================================
// PCM conversion tests
// =========================================================================

#[test]
fn test_samples_to_pcm16_scaling_and_clipping() {
    let pcm = samples_to_pcm16(&[0.0, 0.5, -0.5, 1.0, -1.0, 3.0, -3.0, 0.0001]);
    let values: Vec<i16> = (0..8).map(|i| read_i16(&pcm, i)).collect();
    assert_eq!(values, vec![0, 16384, -16384, 32767, -32767, 32767, -32767, 3]);
}

#[test]
fn test_non_finite_samples() {
    let pcm = samples_to_pcm16(&[f64::NAN, f64::INFINITY, f64::NEG_INFINITY]);
    assert_eq!(read_i16(&pcm, 0), 0);
    assert_eq!(read_i16(&pcm, 1), 32767);
    assert_eq!(read_i16(&pcm, 2), -32767);
}

#[test]
fn test_interleave_frame_order() {
    let pcm = interleave_to_pcm16(&[&[0.5, 1.0], &[-0.5, -1.0], &[0.0, 0.25]]);
    let values: Vec<i16> = (0..6).map(|i| read_i16(&pcm, i)).collect();
    assert_eq!(values, vec![16384, -16384, 0, 32767, -32767, 8192]);
}

#[test]
fn test_interleave_uses_shortest_channel() {
    let pcm = interleave_to_pcm16(&[&[0.1, 0.2, 0.3], &[0.1]]);
    assert_eq!(pcm.len(), 4);
    assert!(interleave_to_pcm16(&[]).is_empty());
}

// =========================================================================
// Header tests
// =========================================================================

#[test]
fn test_header_layout() {
    let format = WavFormat::new(3, 22050);
    let pcm = interleave_to_pcm16(&[&[0.0; 5], &[0.0; 5], &[0.0; 5]]);
    let wav = write_wav_to_vec(&format, &pcm).unwrap();

    assert_eq!(wav.len(), HEADER_SIZE + 30);
    assert_eq!(&wav[0..4], b"RIFF");
    assert_eq!(u32::from_le_bytes([wav[4], wav[5], wav[6], wav[7]]) as usize, wav.len() - 8);
    assert_eq!(&wav[8..16], b"WAVEfmt ");
    assert_eq!(u16::from_le_bytes([wav[22], wav[23]]), 3);
    assert_eq!(u32::from_le_bytes([wav[24], wav[25], wav[26], wav[27]]), 22050);
    assert_eq!(u16::from_le_bytes([wav[32], wav[33]]), 6);
    assert_eq!(&wav[36..40], b"data");
    assert_eq!(u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]]), 30);
}

// =========================================================================
// PCM extraction and hashing
// =========================================================================

#[test]
fn test_extract_pcm_round_trip() {
    let pcm = samples_to_pcm16(&[0.1, -0.2, 0.3]);
    let wav = write_wav_to_vec(&WavFormat::new(1, 8000), &pcm).unwrap();
    assert_eq!(extract_pcm_data(&wav), Some(&pcm[..]));
    assert_eq!(extract_pcm_data(&wav).map(hash_pcm), Some(hash_pcm(&pcm)));
}

#[test]
fn test_extract_pcm_rejects_garbage() {
    assert_eq!(extract_pcm_data(b"not a wav file at all, sorry"), None);
    assert_eq!(extract_pcm_data(&[]), None);

    let pcm = samples_to_pcm16(&[0.5; 4]);
    let mut wav = write_wav_to_vec(&WavFormat::new(1, 8000), &pcm).unwrap();
    wav.truncate(wav.len() - 2);
    assert_eq!(extract_pcm_data(&wav), None);
}

#[test]
fn test_hash_distinguishes_content() {
    let a = hash_pcm(&samples_to_pcm16(&[0.5, -0.5, 0.3]));
    let b = hash_pcm(&samples_to_pcm16(&[0.5, -0.5, 0.31]));
    assert_ne!(a, b);
    assert_eq!(a.len(), 64);
}

// =========================================================================
// WavResult tests
// =========================================================================

#[test]
fn test_from_buffer_reads_back_with_hound() {
    let buffer = buffer_with(&[&[0.0, 0.5, 1.0], &[0.0, -0.5, -1.0]], 16000);
    let result = WavResult::from_buffer(&buffer).unwrap();

    assert_eq!(result.channels, 2);
    assert_eq!(result.num_samples, 3);
    assert_eq!(result.sample_rate, 16000);

    let reader = hound::WavReader::new(Cursor::new(result.wav_data.clone())).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.sample_rate, 16000);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_format, hound::SampleFormat::Int);

    let samples: Vec<i16> = reader.into_samples::<i16>().map(Result::unwrap).collect();
    assert_eq!(samples, vec![0, 0, 16384, -16384, 32767, -32767]);
}

#[test]
fn test_from_buffer_is_deterministic() {
    let buffer = buffer_with(&[&[0.25, -0.75, 0.125]], 8000);
    let first = WavResult::from_buffer(&buffer).unwrap();
    let second = WavResult::from_buffer(&buffer).unwrap();
    assert_eq!(first.wav_data, second.wav_data);
    assert_eq!(first.pcm_hash, second.pcm_hash);
    assert_eq!(extract_pcm_data(&first.wav_data).map(hash_pcm), Some(first.pcm_hash.clone()));
}

#[test]
fn test_single_channel_buffer_duration() {
    let samples = [0.1, 0.2, 0.3, 0.4];
    let mono = WavResult::from_buffer(&buffer_with(&[&samples], 8000)).unwrap();
    assert_eq!(mono.channels, 1);
    assert_eq!(mono.wav_data.len(), HEADER_SIZE + 8);
    assert_eq!(mono.duration_seconds(), 0.0005);
}

#[test]
fn test_from_buffer_without_channels() {
    let buffer = AudioBuffer::new(0, 10, 8000);
    assert!(WavResult::from_buffer(&buffer).is_err());
}

#[test]
fn test_from_buffer_with_too_many_channels_for_header() {
    let buffer = AudioBuffer::new(40_000, 1, 48_000);
    let err = WavResult::from_buffer(&buffer).unwrap_err();
    assert!(matches!(err, RenderError::Wav { .. }), "{:?}", err);
    assert_eq!(err.code(), "RENDER_006");
}
