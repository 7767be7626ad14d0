//! Minimal SVG document builder.
//!
//! Elements are appended as text; coordinates are formatted with two
//! decimals so output is stable across runs.

/// SVG document under construction
pub struct SvgDocument {
    width: u32,
    height: u32,
    defs: String,
    body: String,
}

impl SvgDocument {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            defs: String::new(),
            body: String::new(),
        }
    }

    pub fn width(&self) -> f32 {
        self.width as f32
    }

    pub fn height(&self) -> f32 {
        self.height as f32
    }

    /// Register a rectangular clip region usable as `clip-path="url(#id)"`
    pub fn clip_rect(&mut self, id: &str, x: f32, y: f32, w: f32, h: f32) {
        self.defs.push_str(&format!(
            "<clipPath id=\"{}\"><rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\"/></clipPath>",
            id, x, y, w, h
        ));
    }

    /// Register a vertical gradient; `stops` are (offset 0..1, color) from bottom to top
    pub fn vertical_gradient(&mut self, id: &str, stops: &[(f32, String)]) {
        self.defs.push_str(&format!(
            "<linearGradient id=\"{}\" x1=\"0\" y1=\"1\" x2=\"0\" y2=\"0\">",
            id
        ));
        for (offset, color) in stops {
            self.defs.push_str(&format!(
                "<stop offset=\"{:.4}\" stop-color=\"{}\"/>",
                offset, color
            ));
        }
        self.defs.push_str("</linearGradient>");
    }

    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, fill: &str) {
        self.rect_with(x, y, w, h, fill, "");
    }

    /// Rectangle with extra raw attributes (e.g. `class="bar"`)
    pub fn rect_with(&mut self, x: f32, y: f32, w: f32, h: f32, fill: &str, attrs: &str) {
        let sep = if attrs.is_empty() { "" } else { " " };
        self.body.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\"{}{}/>",
            x,
            y,
            w.max(0.0),
            h.max(0.0),
            fill,
            sep,
            attrs
        ));
    }

    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, stroke: &str, stroke_width: f32) {
        self.body.push_str(&format!(
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"{:.2}\"/>",
            x1, y1, x2, y2, stroke, stroke_width
        ));
    }

    /// Text anchored at (x, y); `anchor` is start, middle or end
    pub fn text(&mut self, x: f32, y: f32, content: &str, size: u32, anchor: &str) {
        self.body.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" font-family=\"sans-serif\" font-size=\"{}\" text-anchor=\"{}\">{}</text>",
            x,
            y,
            size,
            anchor,
            escape(content)
        ));
    }

    /// Text rotated -90 degrees around its anchor (vertical axis labels)
    pub fn vertical_text(&mut self, x: f32, y: f32, content: &str, size: u32) {
        self.body.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" font-family=\"sans-serif\" font-size=\"{}\" text-anchor=\"middle\" transform=\"rotate(-90 {:.2} {:.2})\">{}</text>",
            x,
            y,
            size,
            x,
            y,
            escape(content)
        ));
    }

    pub fn path(&mut self, d: &str, fill: &str, stroke: &str, attrs: &str) {
        let sep = if attrs.is_empty() { "" } else { " " };
        self.body.push_str(&format!(
            "<path d=\"{}\" fill=\"{}\" stroke=\"{}\"{}{}/>",
            d, fill, stroke, sep, attrs
        ));
    }

    /// Open a group; must be matched by `end_group`
    pub fn begin_group(&mut self, attrs: &str) {
        if attrs.is_empty() {
            self.body.push_str("<g>");
        } else {
            self.body.push_str(&format!("<g {}>", attrs));
        }
    }

    pub fn end_group(&mut self) {
        self.body.push_str("</g>");
    }

    pub fn finish(self) -> String {
        let mut out = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
            w = self.width,
            h = self.height
        );
        if !self.defs.is_empty() {
            out.push_str("<defs>");
            out.push_str(&self.defs);
            out.push_str("</defs>");
        }
        out.push_str("<rect width=\"100%\" height=\"100%\" fill=\"white\"/>");
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }
}

/// Escape XML special characters in text content
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Evenly spaced "nice" tick values covering [min, max]
pub fn ticks(min: f32, max: f32, target_count: usize) -> Vec<f32> {
    if !(max > min) || target_count == 0 {
        return vec![min];
    }
    let raw = (max - min) / target_count as f32;
    let magnitude = 10f32.powf(raw.log10().floor());
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|&s| s >= raw * 0.999)
        .unwrap_or(10.0 * magnitude);

    let first = (min / step - 1e-4).ceil() as i64;
    let last = (max / step + 1e-4).floor() as i64;
    (first..=last).map(|i| i as f32 * step).collect()
}
