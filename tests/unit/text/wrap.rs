use super::*;
use crate::text::measure::MonospaceMeasure;

fn params(w: u32, h: u32, amount: u32, overflow: Overflow) -> TextParams {
    TextParams {
        size: Size::new(w, h),
        amount,
        line_height: 1.0,
        align: Align::Left,
        overflow,
    }
}

#[test]
fn greedy_packing_breaks_before_the_overflowing_word() {
    let mut m = MonospaceMeasure::default();
    let lines = wrap_lines("aaaa bbbb cccc dddd eeee", 50.0, 10.0, &mut m);
    assert_eq!(lines, ["aaaa bbbb", "cccc dddd", "eeee"]);
}

#[test]
fn blank_paragraphs_are_kept() {
    let mut m = MonospaceMeasure::default();
    assert_eq!(wrap_lines("a\n\nb", 100.0, 10.0, &mut m), ["a", "", "b"]);
}

#[test]
fn overwide_word_sits_alone() {
    let mut m = MonospaceMeasure::default();
    let lines = wrap_lines("x supercalifragilistic y", 50.0, 10.0, &mut m);
    assert_eq!(lines, ["x", "supercalifragilistic", "y"]);
}

#[test]
fn overflow_off_truncates_to_amount() {
    let mut m = MonospaceMeasure::default();
    let block = layout_text("one\ntwo\nthree\nfour", params(100, 30, 3, Overflow::Off), &mut m);
    assert_eq!(block.texts(), ["one", "two", "three"]);
    assert_eq!(block.font_size, 10.0);
    assert!(block.truncated);
    assert_eq!(block.lines[2].top, 20.0);
}

#[test]
fn alignment_offsets_each_line() {
    let mut m = MonospaceMeasure::default();
    let mut p = params(100, 30, 3, Overflow::Off);
    p.align = Align::Center;
    assert_eq!(layout_text("ab", p, &mut m).lines[0].x, 45.0);
    p.align = Align::Right;
    assert_eq!(layout_text("ab", p, &mut m).lines[0].x, 90.0);
}

#[test]
fn overflow_on_shrinks_until_the_text_fits() {
    let mut m = MonospaceMeasure::default();
    let block = layout_text("aaaaa bbbbb ccccc", params(100, 20, 1, Overflow::On), &mut m);
    // 17 chars at 0.5em fit 100px once the size drops to 20 * 0.9^6.
    assert_eq!(block.texts(), ["aaaaa bbbbb ccccc"]);
    assert!((block.font_size - 20.0 * 0.9f32.powi(6)).abs() < 1e-3);
    assert!(!block.truncated);
}

#[test]
fn overflow_on_stops_at_the_floor_and_clips() {
    let mut m = MonospaceMeasure::default();
    let content = vec!["x"; 200].join(" ");
    let block = layout_text(&content, params(100, 10, 1, Overflow::On), &mut m);
    assert_eq!(block.font_size, MIN_FONT_SIZE);
    assert_eq!(block.lines.len(), 2);
    assert!(block.truncated);
}

#[test]
fn rewrapping_produced_lines_is_idempotent() {
    let mut m = MonospaceMeasure::default();
    let content = "The quick brown fox jumps over the lazy dog\n\nand keeps running far away";
    let p = params(120, 60, 6, Overflow::Off);
    let block = layout_text(content, p, &mut m);
    let lines: Vec<String> = block.lines.iter().map(|l| l.text.clone()).collect();

    let again = wrap_lines(&lines.join("\n"), 120.0, block.font_size, &mut m);
    assert_eq!(again, lines);
}
