use super::*;

#[test]
fn approx_measure_counts_chars_and_lines() {
    let mut m = ApproxMeasure;
    let s = m.measure("Text", "Arial", 32.0, None);
    assert!((s.width - 4.0 * 0.6 * 32.0).abs() < 1e-9);
    assert_eq!(s.height, 32.0);

    let two = m.measure("ab\nabcd", "Arial", 10.0, None);
    assert!((two.width - 24.0).abs() < 1e-9);
    assert_eq!(two.height, 20.0);

    let empty = m.measure("", "Arial", 10.0, None);
    assert_eq!(empty.width, 0.0);
    assert_eq!(empty.height, 10.0);
}

#[test]
fn approx_wrap_breaks_on_words() {
    // 10px font: 6px per char, 60px fits 10 chars.
    let lines = ApproxMeasure::wrap("hello there general kenobi", 10.0, Some(60.0));
    assert_eq!(lines, vec!["hello", "there", "general", "kenobi"]);

    let lines = ApproxMeasure::wrap("ab cd ef", 10.0, Some(60.0));
    assert_eq!(lines, vec!["ab cd ef"]);
}

#[test]
fn font_book_resolves_css_stacks_case_insensitively() {
    let mut book = FontBook::new();
    book.insert("Raleway", vec![1, 2, 3]);
    assert_eq!(book.resolve("Chewy, 'raleway', sans-serif").map(|(k, _)| k), Some("raleway"));
    assert!(book.resolve("Chewy, cursive").is_none());
    assert_eq!(book.families().collect::<Vec<_>>(), vec!["raleway"]);
}

#[test]
fn engine_without_fonts_falls_back_to_approx_metrics() {
    let mut engine = TextEngine::default();
    assert!(!engine.has_font("Arial"));
    let s = engine.measure("Text", "Arial", 32.0, None);
    assert_eq!(s, ApproxMeasure.measure("Text", "Arial", 32.0, None));
}
