use crate::models::{Advisory, CropRecommendation, SoilHealthReport, WeatherSnapshot};
use crate::ui::components::{
    humidity_gauge, nav_bar, rainfall_gauge, soil_score_gauge, temperature_gauge, wind_gauge,
};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
};

pub struct DashboardScreen<'a> {
    pub farm_label: &'a str,
    pub season: &'a str,
    pub weather: &'a WeatherSnapshot,
    pub recommendations: &'a [CropRecommendation],
    pub alerts: &'a [&'a Advisory],
    pub soil_report: &'a SoilHealthReport,
    pub status_message: Option<&'a str>,
}

impl<'a> DashboardScreen<'a> {
    pub fn new(
        farm_label: &'a str,
        season: &'a str,
        weather: &'a WeatherSnapshot,
        recommendations: &'a [CropRecommendation],
        alerts: &'a [&'a Advisory],
        soil_report: &'a SoilHealthReport,
    ) -> Self {
        Self {
            farm_label,
            season,
            weather,
            recommendations,
            alerts,
            soil_report,
            status_message: None,
        }
    }

    pub fn with_status(mut self, status: Option<&'a str>) -> Self {
        self.status_message = status;
        self
    }
}

impl Widget for DashboardScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(5), // Gauges row
                Constraint::Min(8),    // Top crops and alerts
                Constraint::Length(1), // Status message
                Constraint::Length(1), // Nav bar
            ])
            .split(area);

        self.render_header(chunks[0], buf);
        self.render_gauges(chunks[1], buf);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[2]);

        self.render_top_crops(middle[0], buf);
        self.render_alerts(middle[1], buf);

        self.render_status_message(chunks[3], buf);

        let nav = nav_bar(&[("r", "Refresh"), ("s", "Season")]);
        Paragraph::new(nav).render(chunks[4], buf);
    }
}

impl DashboardScreen<'_> {
    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let title = format!("CropOps - {}", self.farm_label);

        let block = Block::default()
            .title(Span::styled(title, Theme::title()))
            .borders(Borders::BOTTOM)
            .border_style(Theme::border());

        let info = Line::from(vec![
            Span::styled("Season: ", Theme::dim()),
            Span::styled(self.season, Theme::highlight()),
            Span::styled("  Weather: ", Theme::dim()),
            Span::styled(self.weather.source.as_str(), Theme::normal()),
            Span::styled(
                format!(
                    " ({})",
                    self.weather.fetched_at.format("%Y-%m-%d %H:%M UTC")
                ),
                Theme::dim(),
            ),
        ]);
        Paragraph::new(info).block(block).render(area, buf);
    }

    fn render_gauges(&self, area: Rect, buf: &mut Buffer) {
        let gauge_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(20); 5])
            .split(area);

        temperature_gauge("Temperature", Some(self.weather.temperature_c))
            .render(gauge_chunks[0], buf);
        humidity_gauge("Humidity", Some(self.weather.humidity_pct)).render(gauge_chunks[1], buf);
        rainfall_gauge("Rainfall", Some(self.weather.rainfall_mm)).render(gauge_chunks[2], buf);
        wind_gauge("Wind", Some(self.weather.wind_speed)).render(gauge_chunks[3], buf);
        soil_score_gauge("Soil Health", Some(self.soil_report.overall_score as f64))
            .caption(self.soil_report.status.as_str())
            .render(gauge_chunks[4], buf);
    }

    fn render_top_crops(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Top Crops", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        if self.recommendations.is_empty() {
            let para = Paragraph::new(Span::styled(
                "No crop clears the suitability threshold",
                Theme::dim(),
            ));
            para.render(inner, buf);
            return;
        }

        let items: Vec<ListItem> = self
            .recommendations
            .iter()
            .take(3)
            .map(|rec| {
                let pct = rec.score_percent();
                let title_line = Line::from(vec![
                    Span::styled(
                        format!("{:>3}% ", pct),
                        Style::default().fg(Theme::score_color(pct)),
                    ),
                    Span::styled(rec.crop.name, Theme::header()),
                    Span::styled(format!(" ({})", rec.crop.name_hindi), Theme::dim()),
                ]);
                let detail_line = Line::from(vec![
                    Span::styled("  sow ", Theme::dim()),
                    Span::styled(rec.sowing_date.format("%d %b").to_string(), Theme::normal()),
                    Span::styled("  ₹", Theme::dim()),
                    Span::styled(format!("{:.0}", rec.estimated_profit), Theme::success()),
                ]);
                ListItem::new(vec![title_line, detail_line])
            })
            .collect();

        List::new(items).render(inner, buf);
    }

    fn render_alerts(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Weather Alerts", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        if self.alerts.is_empty() {
            let para = Paragraph::new(Span::styled("No active alerts", Theme::dim()));
            para.render(inner, buf);
            return;
        }

        let items: Vec<ListItem> = self
            .alerts
            .iter()
            .take(3)
            .map(|a| {
                let severity_style = Style::default().fg(a.severity.color());
                let title_line = Line::from(vec![
                    Span::styled(format!("{} ", a.severity.symbol()), severity_style),
                    Span::styled(&a.title, severity_style),
                ]);
                let desc_line = Line::from(vec![
                    Span::styled("  ", Theme::dim()),
                    Span::styled(&a.description, Theme::dim()),
                ]);
                ListItem::new(vec![title_line, desc_line])
            })
            .collect();

        List::new(items).render(inner, buf);
    }

    fn render_status_message(&self, area: Rect, buf: &mut Buffer) {
        if let Some(msg) = self.status_message {
            let style = if msg.contains("OFFLINE") || msg.contains("failed") {
                Theme::warning()
            } else {
                Theme::success()
            };
            Paragraph::new(Span::styled(msg, style)).render(area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasources::mock::mock_weather;
    use crate::logic::soil_health::analyze_soil_health;
    use crate::models::SoilSample;
    use chrono::NaiveDate;

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut out = String::new();
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn renders_header_and_empty_states() {
        let weather = mock_weather(NaiveDate::from_ymd_opt(2026, 7, 1).unwrap());
        let report = analyze_soil_health(&SoilSample::default());
        let screen = DashboardScreen::new("My Farm", "kharif", &weather, &[], &[], &report)
            .with_status(Some("Data refreshed"));

        let area = Rect::new(0, 0, 120, 24);
        let mut buf = Buffer::empty(area);
        screen.render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("CropOps - My Farm"));
        assert!(text.contains("Season: kharif"));
        assert!(text.contains("No active alerts"));
        assert!(text.contains("Data refreshed"));
    }
}
