use crate::ui::Theme;
use ratatui::text::{Line, Span};

/// Screen switcher shown on every screen, followed by screen-specific keys.
pub fn nav_bar<'a>(extra: &[(&'a str, &'a str)]) -> Line<'a> {
    let mut spans = vec![
        Span::styled("[1]", Theme::nav_key()),
        Span::styled("Dashboard ", Theme::nav_label()),
        Span::styled("[2]", Theme::nav_key()),
        Span::styled("Weather ", Theme::nav_label()),
        Span::styled("[3]", Theme::nav_key()),
        Span::styled("Crops ", Theme::nav_label()),
        Span::styled("[4]", Theme::nav_key()),
        Span::styled("Soil ", Theme::nav_label()),
        Span::styled("[5]", Theme::nav_key()),
        Span::styled("Market ", Theme::nav_label()),
    ];
    for (key, label) in extra {
        spans.push(Span::styled(format!("[{}]", key), Theme::nav_key()));
        spans.push(Span::styled(format!("{} ", label), Theme::nav_label()));
    }
    spans.push(Span::styled("[q]", Theme::nav_key()));
    spans.push(Span::styled("Quit", Theme::nav_label()));
    Line::from(spans)
}
