use super::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::io::Cursor;

const SAMPLE_RATE: u32 = 22_050;

fn analyzer() -> EmotionAnalyzer {
    EmotionAnalyzer::new(&AnalysisConfig::default()).unwrap()
}

fn sine(frequency: f32, amplitude: f32, seconds: f32) -> Vec<f32> {
    let len = (seconds * SAMPLE_RATE as f32) as usize;
    (0..len)
        .map(|i| {
            amplitude
                * (2.0 * std::f32::consts::PI * frequency * i as f32 / SAMPLE_RATE as f32).sin()
        })
        .collect()
}

fn noise(amplitude: f32, seconds: f32) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(42);
    let len = (seconds * SAMPLE_RATE as f32) as usize;
    (0..len).map(|_| rng.gen_range(-amplitude..amplitude)).collect()
}

/// Encode samples as a 32-bit float mono WAV
fn wav_bytes(samples: &[f32], sample_rate: u32) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for &sample in samples {
            writer.write_sample(sample).unwrap();
        }
        writer.finalize().unwrap();
    }
    cursor.into_inner()
}

#[test]
fn test_loud_high_tone_is_excited() {
    let analysis = analyzer()
        .analyze_bytes(&wav_bytes(&sine(250.0, 0.5, 1.0), SAMPLE_RATE), None)
        .unwrap();

    assert!(analysis.features.pitch_mean > 180.0);
    assert!(analysis.features.energy > 0.02);
    assert_eq!(analysis.emotion, EmotionLabel::ExcitedAngry);
}

#[test]
fn test_silence_degrades_to_zero_features() {
    let analysis = analyzer()
        .analyze_bytes(&wav_bytes(&vec![0.0; 22_050], SAMPLE_RATE), None)
        .unwrap();

    assert_eq!(analysis.features, FeatureSet::default());
    // Zero pitch and zero energy satisfy the Sad rule
    assert_eq!(analysis.emotion, EmotionLabel::Sad);
    assert_eq!(analysis.spectrum.sad, 1.0);
}

#[test]
fn test_quiet_noise_is_fearful() {
    let analysis = analyzer()
        .analyze_bytes(&wav_bytes(&noise(0.2, 1.0), SAMPLE_RATE), None)
        .unwrap();

    println!("Quiet noise features: {:?}", analysis.features);
    assert!(analysis.features.energy > 0.01 && analysis.features.energy < 0.02);
    assert!(analysis.features.zero_crossing_rate > 0.1);
    assert!(analysis.features.spectral_centroid > 2500.0);
    assert_eq!(analysis.emotion, EmotionLabel::FearAnxiety);
}

#[test]
fn test_moderate_low_tone_is_neutral() {
    let analysis = analyzer()
        .analyze_bytes(&wav_bytes(&sine(160.0, 0.3, 1.0), SAMPLE_RATE), None)
        .unwrap();

    println!("160 Hz tone features: {:?}", analysis.features);
    assert!(analysis.features.pitch_mean <= 180.0);
    assert_eq!(analysis.emotion, EmotionLabel::NeutralCalm);
}

#[test]
fn test_resampled_input_is_analysed_at_target_rate() {
    let samples: Vec<f32> = (0..44_100)
        .map(|i| 0.5 * (2.0 * std::f32::consts::PI * 250.0 * i as f32 / 44_100.0).sin())
        .collect();
    let analysis = analyzer()
        .analyze_bytes(&wav_bytes(&samples, 44_100), Some(AudioFormat::Wav))
        .unwrap();

    assert_eq!(analysis.clip.sample_rate(), SAMPLE_RATE);
    assert_eq!(analysis.clip.len(), 22_050);
    assert_eq!(analysis.emotion, EmotionLabel::ExcitedAngry);
}

#[test]
fn test_decode_failure_stops_pipeline() {
    let err = analyzer()
        .analyze_bytes(b"not an audio file", None)
        .unwrap_err();
    assert!(matches!(err, DecodeError::UnsupportedFormat { .. }));

    let err = analyzer().analyze_bytes(&[], None).unwrap_err();
    assert_eq!(err, DecodeError::EmptyInput);
}

#[test]
fn test_analysis_is_deterministic() {
    let bytes = wav_bytes(&noise(0.4, 0.5), SAMPLE_RATE);
    let first = analyzer().analyze_bytes(&bytes, None).unwrap();
    let second = analyzer().analyze_bytes(&bytes, None).unwrap();

    assert_eq!(first.clip, second.clip);
    assert_eq!(first.features, second.features);
    assert_eq!(first.emotion, second.emotion);
    assert_eq!(first.spectrum, second.spectrum);
}

#[test]
fn test_spectrum_matches_features() {
    let analysis = analyzer().analyze_clip(AudioClip::new(sine(300.0, 0.4, 0.5), SAMPLE_RATE));
    assert_eq!(
        analysis.spectrum,
        EmotionSpectrum::from_features(&analysis.features)
    );
}

#[test]
fn test_spectrogram_for_rendering() {
    let analyzer = analyzer();
    let clip = AudioClip::new(sine(440.0, 0.5, 1.0), SAMPLE_RATE);
    let spectrogram = analyzer.spectrogram(&clip, 80.0);

    assert_eq!(spectrogram.frame_count(), 44);
    assert_eq!(spectrogram.bin_count(), 1025);
    assert!((spectrogram.max_db() - spectrogram.min_db() - 80.0).abs() < 1e-3);
    assert!(spectrogram
        .frames()
        .iter()
        .flatten()
        .all(|&db| db >= spectrogram.min_db() && db <= spectrogram.max_db()));
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = AnalysisConfig {
        sample_rate: 0,
        ..AnalysisConfig::default()
    };
    assert!(EmotionAnalyzer::new(&config).is_err());
}
