// Spectrogram - time/frequency heatmap of a decibel spectrogram
//
// The frame x bin matrix is max-pooled down to at most
// `max_columns x max_rows` cells, colored with magma between the
// spectrogram's floor and peak, and drawn with a dB colorbar. Adjacent cells
// in a row that fall into the same color bucket are merged into one rect.

use crate::analysis::DecibelSpectrogram;
use crate::render::colormap::{magma, quantized};
use crate::render::svg::{ticks, SvgDocument};

const MARGIN_LEFT: f32 = 70.0;
const MARGIN_RIGHT: f32 = 90.0;
const MARGIN_TOP: f32 = 40.0;
const MARGIN_BOTTOM: f32 = 50.0;
const COLORBAR_WIDTH: f32 = 16.0;
const COLOR_LEVELS: usize = 64;

/// Max-pool a (frames x bins) matrix into (columns x rows) cells
///
/// Row 0 holds the lowest frequencies.
pub fn pool(frames: &[Vec<f32>], max_columns: usize, max_rows: usize) -> Vec<Vec<f32>> {
    let frame_count = frames.len();
    let bin_count = frames.iter().map(Vec::len).min().unwrap_or(0);
    if frame_count == 0 || bin_count == 0 || max_columns == 0 || max_rows == 0 {
        return Vec::new();
    }

    let columns = frame_count.min(max_columns);
    let rows = bin_count.min(max_rows);

    (0..columns)
        .map(|c| {
            let f_start = c * frame_count / columns;
            let f_end = ((c + 1) * frame_count / columns).max(f_start + 1);
            (0..rows)
                .map(|r| {
                    let b_start = r * bin_count / rows;
                    let b_end = ((r + 1) * bin_count / rows).max(b_start + 1);
                    frames[f_start..f_end]
                        .iter()
                        .flat_map(|frame| frame[b_start..b_end].iter())
                        .fold(f32::NEG_INFINITY, |acc, &v| acc.max(v))
                })
                .collect()
        })
        .collect()
}

pub fn render(
    spectrogram: &DecibelSpectrogram,
    width: u32,
    height: u32,
    max_columns: usize,
    max_rows: usize,
) -> String {
    let mut doc = SvgDocument::new(width, height);
    let plot_w = doc.width() - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = doc.height() - MARGIN_TOP - MARGIN_BOTTOM;
    let baseline = MARGIN_TOP + plot_h;

    let max_db = spectrogram.max_db();
    let min_db = spectrogram.min_db();
    let range = max_db - min_db;
    let cells = pool(spectrogram.frames(), max_columns, max_rows);
    // A flat matrix (e.g. silence) is drawn at the bottom of the scale
    let flat = cells.iter().flatten().all(|&db| db >= max_db);
    let normalize = |db: f32| {
        if range > 0.0 && !flat {
            (db - min_db) / range
        } else {
            0.0
        }
    };

    doc.text(doc.width() / 2.0, MARGIN_TOP / 2.0 + 6.0, "Spectrogram", 18, "middle");

    doc.rect(MARGIN_LEFT, MARGIN_TOP, plot_w, plot_h, &magma(0.0).hex());
    if let Some(first) = cells.first() {
        let cell_w = plot_w / cells.len() as f32;
        let cell_h = plot_h / first.len() as f32;

        doc.begin_group("class=\"heatmap\" shape-rendering=\"crispEdges\"");
        for row in 0..first.len() {
            let y = baseline - (row + 1) as f32 * cell_h;
            let mut run_start = 0;
            while run_start < cells.len() {
                let (bucket, color) = quantized(normalize(cells[run_start][row]), COLOR_LEVELS);
                let mut run_end = run_start + 1;
                while run_end < cells.len()
                    && quantized(normalize(cells[run_end][row]), COLOR_LEVELS).0 == bucket
                {
                    run_end += 1;
                }
                // The floor color is already the background
                if bucket > 0 {
                    doc.rect(
                        MARGIN_LEFT + run_start as f32 * cell_w,
                        y,
                        (run_end - run_start) as f32 * cell_w,
                        cell_h,
                        &color.hex(),
                    );
                }
                run_start = run_end;
            }
        }
        doc.end_group();
    }

    // Frequency axis (linear Hz)
    let nyquist = spectrogram.max_frequency();
    if nyquist > 0.0 {
        for tick in ticks(0.0, nyquist, 5) {
            let y = baseline - tick / nyquist * plot_h;
            doc.line(MARGIN_LEFT - 5.0, y, MARGIN_LEFT, y, "black", 1.0);
            doc.text(MARGIN_LEFT - 8.0, y + 4.0, &format!("{:.0}", tick), 11, "end");
        }
    }
    doc.vertical_text(MARGIN_LEFT - 52.0, MARGIN_TOP + plot_h / 2.0, "Hz", 13);

    // Time axis
    let duration = spectrogram.duration_seconds();
    if duration > 0.0 {
        for tick in ticks(0.0, duration, 8) {
            let x = MARGIN_LEFT + tick / duration * plot_w;
            doc.line(x, baseline, x, baseline + 5.0, "black", 1.0);
            doc.text(x, baseline + 18.0, &format!("{:.2}", tick), 11, "middle");
        }
    }
    doc.text(MARGIN_LEFT + plot_w / 2.0, doc.height() - 10.0, "Time (s)", 13, "middle");

    // Colorbar
    let bar_x = MARGIN_LEFT + plot_w + 20.0;
    let stops: Vec<(f32, String)> = (0..=8)
        .map(|i| {
            let t = i as f32 / 8.0;
            (t, magma(t).hex())
        })
        .collect();
    doc.vertical_gradient("magma", &stops);
    doc.rect_with(
        bar_x,
        MARGIN_TOP,
        COLORBAR_WIDTH,
        plot_h,
        "url(#magma)",
        "class=\"colorbar\"",
    );
    if range > 0.0 {
        for tick in ticks(min_db, max_db, 4) {
            let y = baseline - (tick - min_db) / range * plot_h;
            doc.line(bar_x + COLORBAR_WIDTH, y, bar_x + COLORBAR_WIDTH + 4.0, y, "black", 1.0);
            doc.text(
                bar_x + COLORBAR_WIDTH + 7.0,
                y + 4.0,
                &format!("{:+.0} dB", tick),
                11,
                "start",
            );
        }
    } else {
        doc.text(
            bar_x + COLORBAR_WIDTH + 7.0,
            baseline + 4.0,
            &format!("{:+.0} dB", max_db),
            11,
            "start",
        );
    }

    doc.finish()
}
