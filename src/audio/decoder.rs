//! Decoding of uploaded WAV/MP3 files into mono clips at the analysis rate.
//!
//! WAV goes through `hound`; MP3 goes through `symphonia`. Both paths mix
//! down to mono by averaging channels and then resample to the target rate.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::audio::{AudioClip, Resampler};
use crate::error::DecodeError;

/// Accepted upload formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    /// Uncompressed PCM in a RIFF/WAVE container
    Wav,
    /// MPEG-1/2 Layer III
    Mp3,
}

impl AudioFormat {
    /// Map a file extension (case-insensitive, without the dot)
    pub fn from_extension(ext: &str) -> Result<Self, DecodeError> {
        match ext.to_ascii_lowercase().as_str() {
            "wav" | "wave" => Ok(AudioFormat::Wav),
            "mp3" => Ok(AudioFormat::Mp3),
            other => Err(DecodeError::UnsupportedFormat {
                format: other.to_string(),
            }),
        }
    }

    /// Guess the format from the leading bytes
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WAVE" {
            return Some(AudioFormat::Wav);
        }
        if bytes.len() >= 3 && &bytes[0..3] == b"ID3" {
            return Some(AudioFormat::Mp3);
        }
        // MPEG audio frame sync: 11 set bits
        if bytes.len() >= 2 && bytes[0] == 0xFF && (bytes[1] & 0xE0) == 0xE0 {
            return Some(AudioFormat::Mp3);
        }
        None
    }

    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "wav",
            AudioFormat::Mp3 => "mp3",
        }
    }
}

/// Decoder producing mono clips at a fixed sample rate
pub struct AudioDecoder {
    resampler: Resampler,
}

impl AudioDecoder {
    pub fn new(target_sample_rate: u32) -> Self {
        Self {
            resampler: Resampler::new(target_sample_rate),
        }
    }

    pub fn target_sample_rate(&self) -> u32 {
        self.resampler.target_sample_rate()
    }

    /// Decode a file on disk; the extension selects the format when present
    pub fn decode_file(&self, path: &Path) -> Result<AudioClip, DecodeError> {
        let format = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => Some(AudioFormat::from_extension(ext)?),
            None => None,
        };
        let bytes = fs::read(path)?;
        log::debug!(
            "[Decoder] Read {} bytes from {}",
            bytes.len(),
            path.display()
        );
        self.decode_bytes(&bytes, format)
    }

    /// Decode an in-memory upload
    ///
    /// When `format` is `None` the header is sniffed.
    pub fn decode_bytes(
        &self,
        bytes: &[u8],
        format: Option<AudioFormat>,
    ) -> Result<AudioClip, DecodeError> {
        if bytes.is_empty() {
            return Err(DecodeError::EmptyInput);
        }

        let format = match format.or_else(|| AudioFormat::sniff(bytes)) {
            Some(format) => format,
            None => {
                return Err(DecodeError::UnsupportedFormat {
                    format: "unknown".to_string(),
                })
            }
        };

        let (mono, source_rate) = match format {
            AudioFormat::Wav => read_wav(bytes)?,
            AudioFormat::Mp3 => read_compressed(bytes, format)?,
        };

        if mono.is_empty() {
            return Err(DecodeError::EmptyInput);
        }

        let samples = self.resampler.resample(&mono, source_rate)?;
        log::info!(
            "[Decoder] Decoded {:?}: {} samples @ {} Hz -> {} samples @ {} Hz",
            format,
            mono.len(),
            source_rate,
            samples.len(),
            self.target_sample_rate()
        );

        Ok(AudioClip::new(samples, self.target_sample_rate()))
    }
}

impl Default for AudioDecoder {
    fn default() -> Self {
        Self::new(crate::config::TARGET_SAMPLE_RATE)
    }
}

/// Average interleaved frames down to one channel
fn mix_to_mono(interleaved: Vec<f32>, channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return interleaved;
    }
    interleaved
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

fn read_wav(bytes: &[u8]) -> Result<(Vec<f32>, u32), DecodeError> {
    let reader = hound::WavReader::new(Cursor::new(bytes))?;
    let spec = reader.spec();
    if spec.channels == 0 {
        return Err(DecodeError::Malformed {
            reason: "WAV header declares zero channels".to_string(),
        });
    }

    let samples = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<Result<Vec<f32>, _>>()?,
        hound::SampleFormat::Int => {
            if spec.bits_per_sample == 0 || spec.bits_per_sample > 32 {
                return Err(DecodeError::Malformed {
                    reason: format!("unsupported bits_per_sample={}", spec.bits_per_sample),
                });
            }
            let scale = (1u64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|sample| sample.map(|v| v as f32 / scale))
                .collect::<Result<Vec<f32>, _>>()?
        }
    };

    Ok((mix_to_mono(samples, spec.channels as usize), spec.sample_rate))
}

fn read_compressed(bytes: &[u8], format: AudioFormat) -> Result<(Vec<f32>, u32), DecodeError> {
    let source = Cursor::new(bytes.to_vec());
    let mss = MediaSourceStream::new(Box::new(source), Default::default());

    let mut hint = Hint::new();
    hint.with_extension(format.extension());

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|err| DecodeError::Malformed {
            reason: err.to_string(),
        })?;
    let mut reader = probed.format;

    let track = reader
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(DecodeError::NoAudioTrack)?;
    let track_id = track.id;
    let mut sample_rate = track.codec_params.sample_rate.unwrap_or(0);

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|err| DecodeError::Malformed {
            reason: err.to_string(),
        })?;

    let mut interleaved: Vec<f32> = Vec::new();
    let mut channels = 0usize;
    let mut skipped_packets = 0usize;

    loop {
        let packet = match reader.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(err))
                if err.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(err) => {
                return Err(DecodeError::Malformed {
                    reason: err.to_string(),
                })
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                let packet_channels = spec.channels.count();
                if channels != 0 && packet_channels != channels {
                    return Err(DecodeError::Malformed {
                        reason: format!(
                            "channel count changed mid-stream ({} -> {})",
                            channels, packet_channels
                        ),
                    });
                }
                channels = packet_channels;
                sample_rate = spec.rate;

                let mut buffer = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
                buffer.copy_interleaved_ref(decoded);
                interleaved.extend_from_slice(buffer.samples());
            }
            Err(SymphoniaError::DecodeError(reason)) => {
                skipped_packets += 1;
                log::warn!("[Decoder] Skipping corrupt packet: {}", reason);
            }
            Err(err) => {
                return Err(DecodeError::Malformed {
                    reason: err.to_string(),
                })
            }
        }
    }

    if skipped_packets > 0 {
        log::warn!("[Decoder] Skipped {} corrupt packets", skipped_packets);
    }
    if interleaved.is_empty() {
        return Err(DecodeError::EmptyInput);
    }
    if sample_rate == 0 {
        return Err(DecodeError::Malformed {
            reason: "stream does not declare a sample rate".to_string(),
        });
    }

    Ok((mix_to_mono(interleaved, channels), sample_rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wav_bytes(spec: hound::WavSpec, frames: &[Vec<i16>]) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for frame in frames {
                for &sample in frame {
                    writer.write_sample(sample).unwrap();
                }
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    fn int_spec(channels: u16, sample_rate: u32) -> hound::WavSpec {
        hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        }
    }

    #[test]
    fn test_decode_mono_wav_normalizes_pcm() {
        let frames = vec![vec![16_384], vec![-16_384], vec![0], vec![-32_768]];
        let bytes = wav_bytes(int_spec(1, 22_050), &frames);

        let clip = AudioDecoder::default().decode_bytes(&bytes, None).unwrap();
        assert_eq!(clip.sample_rate(), 22_050);
        assert_eq!(clip.samples(), &[0.5, -0.5, 0.0, -1.0]);
    }

    #[test]
    fn test_decode_stereo_wav_mixes_down() {
        let frames = vec![vec![16_384, 0], vec![-16_384, -16_384]];
        let bytes = wav_bytes(int_spec(2, 22_050), &frames);

        let clip = AudioDecoder::default()
            .decode_bytes(&bytes, Some(AudioFormat::Wav))
            .unwrap();
        assert_eq!(clip.samples(), &[0.25, -0.5]);
    }

    #[test]
    fn test_decode_float_wav() {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 22_050,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for sample in [0.125f32, -0.25, 0.75] {
                writer.write_sample(sample).unwrap();
            }
            writer.finalize().unwrap();
        }

        let clip = AudioDecoder::default()
            .decode_bytes(&cursor.into_inner(), None)
            .unwrap();
        assert_eq!(clip.samples(), &[0.125, -0.25, 0.75]);
    }

    #[test]
    fn test_decode_resamples_to_target_rate() {
        let frames: Vec<Vec<i16>> = (0..44_100).map(|_| vec![0]).collect();
        let bytes = wav_bytes(int_spec(1, 44_100), &frames);

        let clip = AudioDecoder::default().decode_bytes(&bytes, None).unwrap();
        assert_eq!(clip.sample_rate(), 22_050);
        assert_eq!(clip.len(), 22_050);
    }

    #[test]
    fn test_empty_input_rejected() {
        let err = AudioDecoder::default().decode_bytes(&[], None).unwrap_err();
        assert_eq!(err, DecodeError::EmptyInput);
    }

    #[test]
    fn test_wav_without_samples_rejected() {
        let bytes = wav_bytes(int_spec(1, 22_050), &[]);
        let err = AudioDecoder::default().decode_bytes(&bytes, None).unwrap_err();
        assert_eq!(err, DecodeError::EmptyInput);
    }

    #[test]
    fn test_unknown_bytes_rejected() {
        let err = AudioDecoder::default()
            .decode_bytes(b"definitely not audio", None)
            .unwrap_err();
        assert!(matches!(err, DecodeError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_truncated_wav_rejected() {
        let err = AudioDecoder::default()
            .decode_bytes(b"RIFF\x24\x00\x00\x00WAVEfmt ", None)
            .unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Malformed { .. } | DecodeError::Io { .. }
        ));
    }

    #[test]
    fn test_garbage_mp3_rejected() {
        let garbage = vec![0x42u8; 256];
        let result = AudioDecoder::default().decode_bytes(&garbage, Some(AudioFormat::Mp3));
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_mp3_tone() {
        // 38 MPEG-1 Layer III frames (1152 samples each) at 44.1 kHz mono
        let bytes = include_bytes!("../../tests/fixtures/tone_210hz.mp3");
        assert_eq!(AudioFormat::sniff(bytes), Some(AudioFormat::Mp3));

        let clip = AudioDecoder::default().decode_bytes(bytes, None).unwrap();
        assert_eq!(clip.sample_rate(), 22_050);
        let expected = 38 * 1152 / 2;
        assert!(
            clip.len().abs_diff(expected) <= 1152,
            "Expected about {} samples, got {}",
            expected,
            clip.len()
        );
        assert!(clip.samples().iter().all(|s| s.is_finite()));
        assert!(clip.peak_amplitude() > 0.01);
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(AudioFormat::from_extension("WAV").unwrap(), AudioFormat::Wav);
        assert_eq!(AudioFormat::from_extension("mp3").unwrap(), AudioFormat::Mp3);
        assert!(matches!(
            AudioFormat::from_extension("flac"),
            Err(DecodeError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_sniff_headers() {
        assert_eq!(
            AudioFormat::sniff(b"RIFF\0\0\0\0WAVEfmt "),
            Some(AudioFormat::Wav)
        );
        assert_eq!(AudioFormat::sniff(b"ID3\x04\x00"), Some(AudioFormat::Mp3));
        assert_eq!(AudioFormat::sniff(&[0xFF, 0xFB, 0x90]), Some(AudioFormat::Mp3));
        assert_eq!(AudioFormat::sniff(b"OggS"), None);
    }
}
