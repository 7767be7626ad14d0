// Bar chart - emotion spectrum
//
// Four bars in chart order on a fixed 0..CHART_CEILING axis. Scores outside
// the axis are drawn as-is and clipped to the plot area.

use crate::analysis::{EmotionLabel, EmotionSpectrum, CHART_CEILING};
use crate::render::svg::{ticks, SvgDocument};

const MARGIN_LEFT: f32 = 70.0;
const MARGIN_RIGHT: f32 = 20.0;
const MARGIN_TOP: f32 = 50.0;
const MARGIN_BOTTOM: f32 = 60.0;

/// Bar fill per category
pub fn bar_color(label: EmotionLabel) -> &'static str {
    match label {
        EmotionLabel::ExcitedAngry => "red",
        EmotionLabel::Sad => "blue",
        EmotionLabel::FearAnxiety => "orange",
        EmotionLabel::NeutralCalm => "green",
    }
}

pub fn render(spectrum: &EmotionSpectrum, width: u32, height: u32) -> String {
    let mut doc = SvgDocument::new(width, height);
    let plot_w = doc.width() - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = doc.height() - MARGIN_TOP - MARGIN_BOTTOM;
    let baseline = MARGIN_TOP + plot_h;
    let y_of = |value: f32| baseline - value / CHART_CEILING * plot_h;

    doc.clip_rect("plot-area", MARGIN_LEFT, MARGIN_TOP, plot_w, plot_h);
    doc.text(doc.width() / 2.0, MARGIN_TOP / 2.0 + 6.0, "Emotion Spectrum", 18, "middle");

    // Y axis with grid
    for tick in ticks(0.0, CHART_CEILING, 6) {
        let y = y_of(tick);
        doc.line(MARGIN_LEFT, y, MARGIN_LEFT + plot_w, y, "#dddddd", 1.0);
        doc.line(MARGIN_LEFT - 5.0, y, MARGIN_LEFT, y, "black", 1.0);
        doc.text(MARGIN_LEFT - 8.0, y + 4.0, &format!("{:.1}", tick), 11, "end");
    }
    doc.vertical_text(MARGIN_LEFT - 45.0, MARGIN_TOP + plot_h / 2.0, "Score", 13);

    let entries = spectrum.entries();
    let slot = plot_w / entries.len() as f32;
    let bar_w = slot * 0.6;

    doc.begin_group("clip-path=\"url(#plot-area)\"");
    for (i, entry) in entries.iter().enumerate() {
        // Non-finite scores have no meaningful bar height
        let value = if entry.score.is_finite() {
            entry.score.clamp(-CHART_CEILING, 2.0 * CHART_CEILING)
        } else {
            0.0
        };
        let x = MARGIN_LEFT + slot * i as f32 + (slot - bar_w) / 2.0;
        let top = y_of(value).min(baseline);
        let bar_h = (y_of(value) - baseline).abs();
        doc.rect_with(
            x,
            top,
            bar_w,
            bar_h,
            bar_color(entry.label),
            &format!(
                "class=\"bar\" data-category=\"{}\" data-score=\"{:.4}\"",
                entry.category, entry.score
            ),
        );
    }
    doc.end_group();

    for (i, entry) in entries.iter().enumerate() {
        let center = MARGIN_LEFT + slot * (i as f32 + 0.5);
        doc.text(center, baseline + 20.0, entry.category, 12, "middle");
    }

    doc.line(MARGIN_LEFT, MARGIN_TOP, MARGIN_LEFT, baseline, "black", 1.0);
    doc.line(MARGIN_LEFT, baseline, MARGIN_LEFT + plot_w, baseline, "black", 1.0);

    doc.finish()
}
