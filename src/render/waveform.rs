// Waveform - amplitude envelope over time
//
// Samples are reduced to one (min, max) pair per horizontal pixel and drawn
// as a filled envelope, so the document size is bounded by the chart width
// rather than the clip length.

use crate::audio::AudioClip;
use crate::render::svg::{ticks, SvgDocument};

const MARGIN_LEFT: f32 = 60.0;
const MARGIN_RIGHT: f32 = 20.0;
const MARGIN_TOP: f32 = 40.0;
const MARGIN_BOTTOM: f32 = 50.0;

const WAVE_COLOR: &str = "#1f77b4";

/// (min, max) of each of `columns` equal slices of `samples`
pub fn envelope(samples: &[f32], columns: usize) -> Vec<(f32, f32)> {
    if samples.is_empty() || columns == 0 {
        return Vec::new();
    }
    let columns = columns.min(samples.len());
    (0..columns)
        .map(|c| {
            let start = c * samples.len() / columns;
            let end = ((c + 1) * samples.len() / columns).max(start + 1);
            samples[start..end]
                .iter()
                .filter(|s| s.is_finite())
                .fold((0.0f32, 0.0f32), |(lo, hi), &s| (lo.min(s), hi.max(s)))
        })
        .collect()
}

pub fn render(clip: &AudioClip, width: u32, height: u32) -> String {
    let mut doc = SvgDocument::new(width, height);
    let plot_w = doc.width() - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = doc.height() - MARGIN_TOP - MARGIN_BOTTOM;
    let mid = MARGIN_TOP + plot_h / 2.0;

    let peak = clip.peak_amplitude();
    let limit = if peak.is_finite() && peak > 1.0 { peak } else { 1.0 };
    let y_of = |value: f32| mid - value / limit * (plot_h / 2.0);
    let duration = clip.duration_seconds();

    doc.text(doc.width() / 2.0, MARGIN_TOP / 2.0 + 6.0, "Waveform", 18, "middle");

    for tick in ticks(-limit, limit, 4) {
        let y = y_of(tick);
        doc.line(MARGIN_LEFT - 5.0, y, MARGIN_LEFT, y, "black", 1.0);
        doc.text(MARGIN_LEFT - 8.0, y + 4.0, &format!("{:.1}", tick), 11, "end");
    }
    if duration > 0.0 {
        for tick in ticks(0.0, duration, 8) {
            let x = MARGIN_LEFT + tick / duration * plot_w;
            doc.line(x, MARGIN_TOP + plot_h, x, MARGIN_TOP + plot_h + 5.0, "black", 1.0);
            doc.text(x, MARGIN_TOP + plot_h + 18.0, &format!("{:.2}", tick), 11, "middle");
        }
    }
    doc.text(MARGIN_LEFT + plot_w / 2.0, doc.height() - 10.0, "Time (s)", 13, "middle");

    doc.line(MARGIN_LEFT, mid, MARGIN_LEFT + plot_w, mid, "#cccccc", 1.0);

    let columns = envelope(clip.samples(), plot_w.max(1.0) as usize);
    if !columns.is_empty() {
        let step = plot_w / columns.len() as f32;
        let mut d = String::new();
        for (i, &(_, hi)) in columns.iter().enumerate() {
            let cmd = if i == 0 { 'M' } else { 'L' };
            d.push_str(&format!("{}{:.2},{:.2} ", cmd, MARGIN_LEFT + step * (i as f32 + 0.5), y_of(hi)));
        }
        for (i, &(lo, _)) in columns.iter().enumerate().rev() {
            d.push_str(&format!("L{:.2},{:.2} ", MARGIN_LEFT + step * (i as f32 + 0.5), y_of(lo)));
        }
        d.push('Z');
        doc.path(&d, WAVE_COLOR, WAVE_COLOR, "class=\"waveform\" stroke-width=\"0.5\"");
    }

    doc.line(MARGIN_LEFT, MARGIN_TOP, MARGIN_LEFT, MARGIN_TOP + plot_h, "black", 1.0);
    doc.line(
        MARGIN_LEFT,
        MARGIN_TOP + plot_h,
        MARGIN_LEFT + plot_w,
        MARGIN_TOP + plot_h,
        "black",
        1.0,
    );

    doc.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_bounds() {
        let samples: Vec<f32> = (0..100).map(|i| if i % 2 == 0 { 0.5 } else { -0.25 }).collect();
        let env = envelope(&samples, 10);
        assert_eq!(env.len(), 10);
        assert!(env.iter().all(|&(lo, hi)| lo == -0.25 && hi == 0.5));
    }

    #[test]
    fn test_envelope_short_clip() {
        let env = envelope(&[0.1, -0.2, 0.3], 720);
        assert_eq!(env, vec![(0.0, 0.1), (-0.2, 0.0), (0.0, 0.3)]);
        assert!(envelope(&[], 10).is_empty());
    }

    #[test]
    fn test_waveform_document() {
        let samples: Vec<f32> = (0..22_050)
            .map(|i| 0.5 * (2.0 * std::f32::consts::PI * 220.0 * i as f32 / 22_050.0).sin())
            .collect();
        let svg = render(&AudioClip::new(samples, 22_050), 800, 480);

        assert!(svg.contains("Waveform"));
        assert!(svg.contains("Time (s)"));
        assert_eq!(svg.matches("class=\"waveform\"").count(), 1);
        assert!(svg.contains(">1.00</text>"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_empty_clip_has_axes_only() {
        let svg = render(&AudioClip::new(Vec::new(), 22_050), 800, 480);
        assert!(svg.contains("Waveform"));
        assert!(!svg.contains("class=\"waveform\""));
    }
}
