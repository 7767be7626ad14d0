// Framing module - centered analysis frames over a sample buffer
//
// Frames are centered: the signal is conceptually padded by frame_length / 2
// on both sides, and frame t starts at t * hop_length in padded coordinates.
// A clip of N samples therefore yields 1 + N / hop_length frames.

/// Padding applied outside the signal bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadMode {
    /// Pad with zeros (used for STFT frames)
    Zero,
    /// Repeat the first/last sample (used for zero-crossing frames)
    Edge,
}

/// Number of centered frames for a signal of `len` samples
pub fn centered_frame_count(len: usize, hop_length: usize) -> usize {
    1 + len / hop_length
}

/// Copy centered frame `index` into `frame` (resized to `frame_length`)
pub fn centered_frame(
    samples: &[f32],
    index: usize,
    frame_length: usize,
    hop_length: usize,
    mode: PadMode,
    frame: &mut Vec<f32>,
) {
    frame.clear();
    frame.resize(frame_length, 0.0);
    if samples.is_empty() {
        return;
    }

    let pad = (frame_length / 2) as isize;
    let start = (index * hop_length) as isize - pad;
    let last = samples.len() as isize - 1;

    for (offset, slot) in frame.iter_mut().enumerate() {
        let pos = start + offset as isize;
        *slot = if (0..=last).contains(&pos) {
            samples[pos as usize]
        } else {
            match mode {
                PadMode::Zero => 0.0,
                PadMode::Edge if pos < 0 => samples[0],
                PadMode::Edge => samples[last as usize],
            }
        };
    }
}
