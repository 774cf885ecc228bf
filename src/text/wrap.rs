use crate::foundation::core::Size;
use crate::scene::layout::{Align, Overflow, Typography};
use crate::text::measure::TextMeasure;

/// Smallest font size `overflow: on` shrinks to.
pub const MIN_FONT_SIZE: f32 = 4.0;

const SHRINK_FACTOR: f32 = 0.9;

/// Box and line budget for one block of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextParams {
    pub size: Size,
    /// Lines the box is divided into; sets the base font size.
    pub amount: u32,
    /// Line height as a multiple of the font size.
    pub line_height: f64,
    pub align: Align,
    pub overflow: Overflow,
}

impl TextParams {
    pub fn for_typography(t: &Typography, size: Size) -> Self {
        Self {
            size,
            amount: t.line.amount,
            line_height: t.line.height,
            align: t.align,
            overflow: t.overflow,
        }
    }
}

/// A positioned line. `x`/`top` are box-local pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub x: f32,
    pub top: f32,
    pub width: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextBlock {
    pub font_size: f32,
    /// Distance between consecutive line tops.
    pub line_pitch: f32,
    pub lines: Vec<TextLine>,
    /// Wrapped lines were dropped to respect the box.
    pub truncated: bool,
}

impl TextBlock {
    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|l| l.text.as_str()).collect()
    }
}

/// Greedy word wrap. Newlines force breaks and blank paragraphs stay as empty lines.
///
/// A word wider than `max_width` gets a line of its own.
pub fn wrap_lines(
    content: &str,
    max_width: f32,
    font_size: f32,
    measure: &mut impl TextMeasure,
) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in content.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate = format!("{current} {word}");
            if measure.advance(&candidate, font_size) > max_width {
                lines.push(std::mem::replace(&mut current, word.to_owned()));
            } else {
                current = candidate;
            }
        }
        lines.push(current);
    }
    lines
}

/// Wrap `content` into the box described by `params`.
///
/// The base font size splits the box height into `amount` lines. Excess lines are
/// dropped (`Overflow::Off`) or the font shrinks by 10% steps until the text fits
/// the box height, stopping at [`MIN_FONT_SIZE`] and clipping whatever remains.
pub fn layout_text(
    content: &str,
    params: TextParams,
    measure: &mut impl TextMeasure,
) -> TextBlock {
    let amount = params.amount.max(1) as usize;
    let line_height = params.line_height as f32;
    let (box_w, box_h) = (params.size.width as f32, params.size.height as f32);

    let mut font_size = box_h / (amount as f32 * line_height);
    let mut lines = wrap_lines(content, box_w, font_size, measure);
    let mut capacity = amount;

    if params.overflow == Overflow::On {
        while lines.len() > capacity && font_size > MIN_FONT_SIZE {
            font_size = (font_size * SHRINK_FACTOR).max(MIN_FONT_SIZE);
            lines = wrap_lines(content, box_w, font_size, measure);
            capacity = lines_that_fit(box_h, font_size * line_height).max(amount);
        }
    }
    let truncated = lines.len() > capacity;
    lines.truncate(capacity);

    let line_pitch = font_size * line_height;
    let lines = lines
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let width = measure.advance(&text, font_size);
            let x = match params.align {
                Align::Left => 0.0,
                Align::Center => (box_w - width) / 2.0,
                Align::Right => box_w - width,
            };
            TextLine {
                text,
                x,
                top: i as f32 * line_pitch,
                width,
            }
        })
        .collect();

    TextBlock {
        font_size,
        line_pitch,
        lines,
        truncated,
    }
}

fn lines_that_fit(box_h: f32, pitch: f32) -> usize {
    (box_h / pitch + 1e-3).floor() as usize
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
