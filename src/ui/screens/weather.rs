use crate::models::{Advisory, WeatherSnapshot};
use crate::ui::components::{humidity_gauge, nav_bar, rainfall_gauge, temperature_gauge, wind_gauge};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table, Widget},
};

pub struct WeatherScreen<'a> {
    pub weather: &'a WeatherSnapshot,
    pub advisories: &'a [Advisory],
}

impl<'a> WeatherScreen<'a> {
    pub fn new(weather: &'a WeatherSnapshot, advisories: &'a [Advisory]) -> Self {
        Self {
            weather,
            advisories,
        }
    }
}

impl Widget for WeatherScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),  // Title
                Constraint::Length(5),  // Current conditions
                Constraint::Length(10), // Forecast table
                Constraint::Min(6),     // Advisories
                Constraint::Length(1),  // Nav
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled("Weather", Theme::title()),
            Span::styled(" - Source: ", Theme::dim()),
            Span::styled(self.weather.source.as_str(), Theme::normal()),
            Span::styled(" - Updated: ", Theme::dim()),
            Span::styled(
                self.weather
                    .fetched_at
                    .format("%Y-%m-%d %H:%M UTC")
                    .to_string(),
                Theme::normal(),
            ),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        self.render_current(chunks[1], buf);
        self.render_forecast(chunks[2], buf);
        self.render_advisories(chunks[3], buf);

        Paragraph::new(nav_bar(&[("r", "Refresh")])).render(chunks[4], buf);
    }
}

impl WeatherScreen<'_> {
    fn render_current(&self, area: Rect, buf: &mut Buffer) {
        let gauge_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(25); 4])
            .split(area);

        let w = self.weather;
        temperature_gauge("Temperature", Some(w.temperature_c)).render(gauge_chunks[0], buf);
        humidity_gauge("Humidity", Some(w.humidity_pct)).render(gauge_chunks[1], buf);
        rainfall_gauge("Rainfall", Some(w.rainfall_mm)).render(gauge_chunks[2], buf);
        wind_gauge("Wind", Some(w.wind_speed)).render(gauge_chunks[3], buf);
    }

    fn render_forecast(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(
                "7-Day Forecast ({:.1}mm total, {:.0} hPa now)",
                self.weather.total_forecast_rain(),
                self.weather.pressure_hpa
            ))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        if self.weather.forecast.is_empty() {
            let inner = block.inner(area);
            block.render(area, buf);
            Paragraph::new(Span::styled("No forecast available", Theme::dim())).render(inner, buf);
            return;
        }

        let header = Row::new(vec![
            Cell::from("Date"),
            Cell::from("Min"),
            Cell::from("Max"),
            Cell::from("Humidity"),
            Cell::from("Rain"),
            Cell::from("Conditions"),
        ])
        .style(Theme::header());

        let rows: Vec<Row> = self
            .weather
            .forecast
            .iter()
            .map(|day| {
                Row::new(vec![
                    Cell::from(day.date.format("%a %d %b").to_string()),
                    Cell::from(format!("{:.1}°C", day.temp_min_c))
                        .style(Style::default().fg(Theme::temp_color(day.temp_min_c))),
                    Cell::from(format!("{:.1}°C", day.temp_max_c))
                        .style(Style::default().fg(Theme::temp_color(day.temp_max_c))),
                    Cell::from(format!("{:.0}%", day.humidity_pct)),
                    Cell::from(format!("{:.1}mm", day.rainfall_mm))
                        .style(Style::default().fg(Theme::rain_color(day.rainfall_mm))),
                    Cell::from(format!("{} {}", day.condition.symbol(), day.condition)),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(12),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(9),
            Constraint::Length(8),
            Constraint::Min(10),
        ];

        Table::new(rows, widths)
            .header(header)
            .block(block)
            .render(area, buf);
    }

    fn render_advisories(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Alerts & Irrigation Advice")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        if self.advisories.is_empty() {
            Paragraph::new(Span::styled(
                "Conditions are normal - no action needed",
                Theme::dim(),
            ))
            .render(inner, buf);
            return;
        }

        let items: Vec<ListItem> = self
            .advisories
            .iter()
            .map(|a| {
                let severity_style = Style::default().fg(a.severity.color());
                let category_style = Style::default().fg(a.category.color());
                let mut spans = vec![
                    Span::styled(format!("{} ", a.severity.symbol()), severity_style),
                    Span::styled(format!("{:<12}", a.category.as_str()), category_style),
                    Span::styled(&a.title, Theme::normal()),
                    Span::styled(format!(" - {}", a.description), Theme::dim()),
                ];
                if !a.data_points.is_empty() {
                    let readings: Vec<String> = a
                        .data_points
                        .iter()
                        .map(|d| format!("{} {}", d.label, d.value))
                        .collect();
                    spans.push(Span::styled(format!(" ({})", readings.join(", ")), Theme::dim()));
                }
                if let Some(ref action) = a.suggested_action {
                    spans.push(Span::styled(format!(" → {}", action), Theme::success()));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        List::new(items).render(inner, buf);
    }
}
