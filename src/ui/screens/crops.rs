use crate::logic::scorer::{
    MARKET_POINTS, SEASON_POINTS, SOIL_POINTS, TEMPERATURE_POINTS, WATER_POINTS,
};
use crate::models::{CropRecommendation, Language};
use crate::ui::components::nav_bar;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget, Wrap},
};

pub struct CropsScreen<'a> {
    pub recommendations: &'a [CropRecommendation],
    pub season: &'a str,
    pub language: Language,
    pub scoring_error: Option<&'a str>,
    pub selected_index: usize,
}

impl<'a> CropsScreen<'a> {
    pub fn new(recommendations: &'a [CropRecommendation], season: &'a str) -> Self {
        Self {
            recommendations,
            season,
            language: Language::En,
            scoring_error: None,
            selected_index: 0,
        }
    }

    pub fn with_selection(mut self, index: usize) -> Self {
        self.selected_index = index;
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn with_error(mut self, error: Option<&'a str>) -> Self {
        self.scoring_error = error;
        self
    }
}

impl Widget for CropsScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(10),   // Content
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled("Crop Advisory", Theme::title()),
            Span::styled(
                format!(
                    " ({} suitable for {})",
                    self.recommendations.len(),
                    self.season
                ),
                Theme::dim(),
            ),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        let content = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[1]);

        self.render_list(content[0], buf);
        self.render_details(content[1], buf);

        let nav = nav_bar(&[("↑↓", "Navigate"), ("s", "Season")]);
        Paragraph::new(nav).render(chunks[2], buf);
    }
}

impl CropsScreen<'_> {
    fn render_list(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Recommended Crops")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        if let Some(err) = self.scoring_error {
            Paragraph::new(Span::styled(err, Theme::error()))
                .wrap(Wrap { trim: true })
                .render(inner, buf);
            return;
        }

        if self.recommendations.is_empty() {
            Paragraph::new(Span::styled(
                "No crop clears the suitability threshold",
                Theme::dim(),
            ))
            .render(inner, buf);
            return;
        }

        let items: Vec<ListItem> = self
            .recommendations
            .iter()
            .enumerate()
            .map(|(i, rec)| {
                let style = if i == self.selected_index {
                    Theme::selected()
                } else {
                    Style::default()
                };
                let pct = rec.score_percent();
                let line = Line::from(vec![
                    Span::styled(
                        format!("{:>3}% ", pct),
                        Style::default().fg(Theme::score_color(pct)),
                    ),
                    Span::styled(rec.crop.display_name(self.language), Theme::normal()),
                    Span::styled(format!("  {}", rec.crop.season), Theme::dim()),
                ]);
                ListItem::new(line).style(style)
            })
            .collect();

        List::new(items).render(inner, buf);
    }

    fn render_details(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Details")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let rec = match self.recommendations.get(self.selected_index) {
            Some(r) => r,
            None => {
                Paragraph::new(Span::styled(
                    "Select a crop to view details",
                    Theme::dim(),
                ))
                .render(inner, buf);
                return;
            }
        };

        let crop = &rec.crop;
        let mut lines = vec![
            Line::from(vec![
                Span::styled(crop.name, Theme::header()),
                Span::styled(format!(" / {}", crop.name_hindi), Theme::dim()),
            ]),
            Line::from(vec![
                Span::styled("Suitability: ", Theme::dim()),
                Span::styled(
                    format!("{}%", rec.score_percent()),
                    Style::default().fg(Theme::score_color(rec.score_percent())),
                ),
                Span::styled("  Water: ", Theme::dim()),
                Span::styled(crop.water_requirement.as_str(), Theme::normal()),
                Span::styled("  Range: ", Theme::dim()),
                Span::styled(
                    format!(
                        "{:.0}-{:.0}°C",
                        crop.temperature_range.min, crop.temperature_range.max
                    ),
                    Theme::normal(),
                ),
            ]),
            Line::from(vec![]),
            Line::from(vec![Span::styled("Score breakdown:", Theme::dim())]),
        ];

        let b = &rec.breakdown;
        for (label, earned, max) in [
            ("Soil", b.soil, SOIL_POINTS),
            ("Temperature", b.temperature, TEMPERATURE_POINTS),
            ("Season", b.season, SEASON_POINTS),
            ("Water", b.water, WATER_POINTS),
            ("Market", b.market, MARKET_POINTS),
        ] {
            let style = if earned > 0 {
                Theme::success()
            } else {
                Theme::dim()
            };
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<12}", label), Theme::dim()),
                Span::styled(format!("{:>2}/{}", earned, max), style),
            ]));
        }
        lines.push(Line::from(vec![]));

        lines.push(Line::from(vec![
            Span::styled("Sow: ", Theme::dim()),
            Span::styled(rec.sowing_date.format("%d %b %Y").to_string(), Theme::normal()),
            Span::styled("  Harvest: ", Theme::dim()),
            Span::styled(rec.harvest_date.format("%d %b %Y").to_string(), Theme::normal()),
            Span::styled(format!(" ({} days)", rec.growing_days()), Theme::dim()),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Expected yield: ", Theme::dim()),
            Span::styled(format!("{} kg/acre", rec.expected_yield_kg), Theme::highlight()),
            Span::styled("  Revenue: ", Theme::dim()),
            Span::styled(format!("₹{:.0}", rec.estimated_profit), Theme::success()),
        ]));

        if !rec.reasons.is_empty() {
            lines.push(Line::from(vec![]));
            lines.push(Line::from(vec![Span::styled("Why:", Theme::dim())]));
            for reason in &rec.reasons {
                lines.push(Line::from(vec![Span::styled(
                    format!("  • {}", reason),
                    Theme::normal(),
                )]));
            }
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasources::mock::mock_weather;
    use crate::logic::catalog::crop_catalog;
    use crate::logic::{CropScorer, ScoringMode};
    use crate::models::{Location, SoilSample};
    use chrono::NaiveDate;

    fn render(screen: CropsScreen<'_>) -> String {
        let area = Rect::new(0, 0, 120, 30);
        let mut buf = Buffer::empty(area);
        screen.render(area, &mut buf);
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn shows_selected_crop_details() {
        let today = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        let recs = CropScorer::new(crop_catalog(), ScoringMode::Legacy)
            .recommend(
                &Location::default(),
                &SoilSample::default(),
                &mock_weather(today),
                2.0,
                "kharif",
                today,
            )
            .unwrap();

        let text = render(CropsScreen::new(&recs, "kharif").with_selection(1));
        assert!(text.contains("Crop Advisory (4 suitable for kharif)"));
        assert!(text.contains("Cotton /"));
        assert!(text.contains("Score breakdown:"));
    }

    #[test]
    fn shows_scoring_error() {
        let text = render(
            CropsScreen::new(&[], "monsoon").with_error(Some("unknown season 'monsoon'")),
        );
        assert!(text.contains("unknown season 'monsoon'"));
    }
}
