// Render module - chart artifacts for an analysed clip
//
// Three artifacts are produced per run:
// - emotion_spectrum.svg: bar chart of the four category scores
// - waveform.svg: amplitude envelope over time
// - spectrogram.svg: dB heatmap with a magma colorbar
//
// Rendering is pure (documents are built in memory); only write_artifacts
// touches the filesystem.

pub mod bar_chart;
pub mod colormap;
pub mod spectrogram;
pub mod svg;
pub mod waveform;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::analysis::{DecibelSpectrogram, EmotionSpectrum};
use crate::audio::AudioClip;
use crate::config::RenderConfig;
use crate::error::{log_config_error, log_render_error, ConfigError, RenderError};

/// Chart producer for the three analysis artifacts
pub trait Renderer {
    /// Bar chart of the category scores on a 0..CHART_CEILING axis
    fn bar_chart(&self, spectrum: &EmotionSpectrum) -> String;

    /// Waveform of the clip over time
    fn waveform(&self, clip: &AudioClip) -> String;

    /// Heatmap of a decibel spectrogram with a colorbar
    fn spectrogram(&self, spectrogram: &DecibelSpectrogram) -> String;
}

/// Which chart an artifact holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ArtifactKind {
    EmotionSpectrum,
    Waveform,
    Spectrogram,
}

impl ArtifactKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            ArtifactKind::EmotionSpectrum => "emotion_spectrum.svg",
            ArtifactKind::Waveform => "waveform.svg",
            ArtifactKind::Spectrogram => "spectrogram.svg",
        }
    }
}

/// A rendered document not yet written to disk
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedArtifact {
    pub kind: ArtifactKind,
    pub content: String,
}

/// Renderer producing standalone SVG documents
#[derive(Debug, Clone, Default)]
pub struct SvgRenderer {
    config: RenderConfig,
}

impl SvgRenderer {
    pub fn new(config: &RenderConfig) -> Result<Self, ConfigError> {
        config.validate().map_err(|err| {
            log_config_error(&err, "SvgRenderer::new");
            err
        })?;
        Ok(Self {
            config: config.clone(),
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }
}

impl Renderer for SvgRenderer {
    fn bar_chart(&self, spectrum: &EmotionSpectrum) -> String {
        bar_chart::render(spectrum, self.config.width, self.config.height)
    }

    fn waveform(&self, clip: &AudioClip) -> String {
        waveform::render(clip, self.config.width, self.config.height)
    }

    fn spectrogram(&self, spectrogram: &DecibelSpectrogram) -> String {
        spectrogram::render(
            spectrogram,
            self.config.width,
            self.config.height,
            self.config.spectrogram_max_columns,
            self.config.spectrogram_max_rows,
        )
    }
}

/// Render all three artifacts in display order
pub fn render_all<R: Renderer + ?Sized>(
    renderer: &R,
    spectrum: &EmotionSpectrum,
    clip: &AudioClip,
    spectrogram: &DecibelSpectrogram,
) -> Vec<RenderedArtifact> {
    let artifacts = vec![
        RenderedArtifact {
            kind: ArtifactKind::EmotionSpectrum,
            content: renderer.bar_chart(spectrum),
        },
        RenderedArtifact {
            kind: ArtifactKind::Waveform,
            content: renderer.waveform(clip),
        },
        RenderedArtifact {
            kind: ArtifactKind::Spectrogram,
            content: renderer.spectrogram(spectrogram),
        },
    ];
    log::debug!(
        "[Renderer] Rendered {} artifacts ({} bytes)",
        artifacts.len(),
        artifacts.iter().map(|a| a.content.len()).sum::<usize>()
    );
    artifacts
}

/// Write artifacts into `dir` (created if missing), returning the file paths
pub fn write_artifacts(
    dir: &Path,
    artifacts: &[RenderedArtifact],
) -> Result<Vec<PathBuf>, RenderError> {
    fs::create_dir_all(dir).map_err(|err| {
        let err = RenderError::OutputDir {
            path: dir.display().to_string(),
            reason: err.to_string(),
        };
        log_render_error(&err, "write_artifacts");
        err
    })?;

    let mut paths = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let path = dir.join(artifact.kind.file_name());
        fs::write(&path, &artifact.content).map_err(|err| {
            let err = RenderError::WriteFailed {
                path: path.display().to_string(),
                reason: err.to_string(),
            };
            log_render_error(&err, "write_artifacts");
            err
        })?;
        log::info!("[Renderer] Wrote {}", path.display());
        paths.push(path);
    }
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{FeatureSet, MagnitudeSpectrogram};

    fn fixtures() -> (EmotionSpectrum, AudioClip, DecibelSpectrogram) {
        let spectrum = EmotionSpectrum::from_features(&FeatureSet::new(200.0, 0.05, 0.2, 3000.0));
        let clip = AudioClip::new(vec![0.0, 0.5, -0.5, 0.25], 4);
        let spectrogram = MagnitudeSpectrogram::new(vec![vec![1.0, 0.1, 0.0]], 8, 4, 2).to_decibels(80.0);
        (spectrum, clip, spectrogram)
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("speech_emotion_render_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_render_all_order() {
        let (spectrum, clip, spectrogram) = fixtures();
        let artifacts = render_all(&SvgRenderer::default(), &spectrum, &clip, &spectrogram);

        let kinds: Vec<ArtifactKind> = artifacts.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ArtifactKind::EmotionSpectrum,
                ArtifactKind::Waveform,
                ArtifactKind::Spectrogram
            ]
        );
        for artifact in &artifacts {
            assert!(artifact.content.starts_with("<svg"));
            assert!(artifact.content.trim_end().ends_with("</svg>"));
        }
    }

    #[test]
    fn test_renderer_uses_configured_size() {
        let config = RenderConfig {
            width: 400,
            height: 300,
            ..RenderConfig::default()
        };
        let renderer = SvgRenderer::new(&config).unwrap();
        let (spectrum, _, _) = fixtures();
        assert!(renderer
            .bar_chart(&spectrum)
            .contains("width=\"400\" height=\"300\""));
    }

    #[test]
    fn test_renderer_rejects_invalid_config() {
        let config = RenderConfig {
            width: 0,
            ..RenderConfig::default()
        };
        assert!(SvgRenderer::new(&config).is_err());
    }

    #[test]
    fn test_write_artifacts() {
        let (spectrum, clip, spectrogram) = fixtures();
        let artifacts = render_all(&SvgRenderer::default(), &spectrum, &clip, &spectrogram);
        let dir = scratch_dir("write").join("nested");

        let paths = write_artifacts(&dir, &artifacts).unwrap();
        let names: Vec<String> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["emotion_spectrum.svg", "waveform.svg", "spectrogram.svg"]);
        for (path, artifact) in paths.iter().zip(&artifacts) {
            assert_eq!(fs::read_to_string(path).unwrap(), artifact.content);
        }

        let _ = fs::remove_dir_all(dir.parent().unwrap());
    }

    #[test]
    fn test_write_artifacts_reports_bad_directory() {
        let base = scratch_dir("blocked");
        fs::create_dir_all(&base).unwrap();
        let file = base.join("not_a_dir");
        fs::write(&file, b"x").unwrap();

        let err = write_artifacts(&file, &[]).unwrap_err();
        assert!(matches!(err, RenderError::OutputDir { .. }));

        let _ = fs::remove_dir_all(&base);
    }
}
