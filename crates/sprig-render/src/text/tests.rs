use super::*;

fn style(font_size: f64) -> TextStyle {
    TextStyle {
        font_size,
        ..Default::default()
    }
}

#[test]
fn deterministic_measurer_scales_with_font_size() {
    let m = DeterministicTextMeasurer::default();
    let a = m.measure("Research", &style(10.0));
    assert_eq!(a.width, 8.0 * 10.0 * 0.6);
    assert_eq!(a.height, 12.0);
    assert_eq!(a.line_count, 1);

    let b = m.measure("Research", &style(20.0));
    assert_eq!(b.width, 2.0 * a.width);
}

#[test]
fn br_tags_split_lines_and_widest_line_wins() {
    let m = DeterministicTextMeasurer::default();
    let metrics = m.measure("ab<br/>abcd<br>a", &style(10.0));
    assert_eq!(metrics.line_count, 3);
    assert_eq!(metrics.width, 4.0 * 6.0);
    assert_eq!(metrics.height, 3.0 * 12.0);
}

#[test]
fn line_splitting_handles_every_break_spelling() {
    assert_eq!(
        DeterministicTextMeasurer::normalized_text_lines("a<br>b<br/>c<br />d\ne"),
        vec!["a", "b", "c", "d", "e"]
    );
    assert_eq!(DeterministicTextMeasurer::normalized_text_lines(""), vec![""]);
}

#[test]
fn empty_text_still_has_one_line_of_height() {
    let m = DeterministicTextMeasurer::default();
    let metrics = m.measure("", &style(10.0));
    assert_eq!(metrics.width, 0.0);
    assert_eq!(metrics.height, 12.0);
}

#[test]
fn wide_glyphs_count_as_two_columns() {
    let m = DeterministicTextMeasurer::default();
    let narrow = m.measure("ab", &style(10.0));
    let wide = m.measure("设计", &style(10.0));
    assert_eq!(wide.width, 2.0 * narrow.width);
}

#[test]
fn custom_factors_override_defaults() {
    let m = DeterministicTextMeasurer {
        char_width_factor: 0.5,
        line_height_factor: 2.0,
    };
    let metrics = m.measure("abcd", &style(10.0));
    assert_eq!(metrics.width, 20.0);
    assert_eq!(metrics.height, 20.0);
}

#[test]
fn font_tier_is_binary() {
    let fonts = FontConfig::default();
    assert_eq!(FontTier::from_depth(-1), FontTier::Root);
    assert_eq!(FontTier::from_depth(0), FontTier::Branch);
    assert_eq!(FontTier::from_depth(7), FontTier::Branch);
    assert_eq!(FontTier::Root.font_size_pt(&fonts), 14.0);
    assert_eq!(FontTier::Branch.font_size_pt(&fonts), 12.0);
}

#[test]
fn closures_are_metrics_providers() {
    let provider = |text: &str, _tier: FontTier| sprig_core::geom::size(text.len() as f64, 1.0);
    assert_eq!(provider.measure("abc", FontTier::Branch).width, 3.0);
}
