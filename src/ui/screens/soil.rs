use crate::models::{FertilizerPlan, SoilHealthReport, SoilSample};
use crate::ui::components::{nav_bar, soil_score_gauge};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Widget, Wrap},
};

pub struct SoilScreen<'a> {
    pub sample: &'a SoilSample,
    pub report: &'a SoilHealthReport,
    pub plan: &'a FertilizerPlan,
}

impl<'a> SoilScreen<'a> {
    pub fn new(sample: &'a SoilSample, report: &'a SoilHealthReport, plan: &'a FertilizerPlan) -> Self {
        Self {
            sample,
            report,
            plan,
        }
    }
}

impl Widget for SoilScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(4), // Overall score
                Constraint::Min(10),   // Bands and advice
                Constraint::Length(9), // Fertilizer plan
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let texture = self
            .sample
            .soil_type
            .map(|t| t.as_str())
            .unwrap_or("unknown");
        let title = Line::from(vec![
            Span::styled("Soil Health", Theme::title()),
            Span::styled(format!(" - {} soil ", texture), Theme::dim()),
            Span::styled(
                format!("[{}]", self.report.status),
                Style::default().fg(self.report.status.color()),
            ),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        soil_score_gauge("Overall", Some(self.report.overall_score as f64))
            .caption(self.report.status.as_str())
            .render(chunks[1], buf);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(chunks[2]);

        self.render_bands(middle[0], buf);
        self.render_advice(middle[1], buf);
        self.render_plan(chunks[3], buf);

        Paragraph::new(nav_bar(&[])).render(chunks[4], buf);
    }
}

impl SoilScreen<'_> {
    fn render_bands(&self, area: Rect, buf: &mut Buffer) {
        let header = Row::new(vec![
            Cell::from("Measure"),
            Cell::from("Value"),
            Cell::from("Points"),
        ])
        .style(Theme::header());

        let s = self.sample;
        let sub = &self.report.sub_scores;
        let rows = vec![
            band_row("pH", format!("{:.1}", s.ph), sub.ph, 25),
            band_row(
                "Organic matter",
                format!("{:.1}%", s.organic_matter_pct),
                sub.organic_matter,
                25,
            ),
            band_row(
                "Nitrogen",
                format!("{:.0}", s.nutrients.nitrogen),
                sub.nitrogen,
                10,
            ),
            band_row(
                "Phosphorus",
                format!("{:.0}", s.nutrients.phosphorus),
                sub.phosphorus,
                10,
            ),
            band_row(
                "Potassium",
                format!("{:.0}", s.nutrients.potassium),
                sub.potassium,
                10,
            ),
            band_row(
                "Moisture",
                format!("{:.0}%", s.moisture_pct),
                sub.moisture,
                20,
            ),
        ];

        let widths = [
            Constraint::Length(16),
            Constraint::Length(8),
            Constraint::Min(6),
        ];

        let block = Block::default()
            .title("Bands")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        Table::new(rows, widths)
            .header(header)
            .block(block)
            .render(area, buf);
    }

    fn render_advice(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Advice")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        if self.report.recommendations.is_empty() && self.report.improvements.is_empty() {
            Paragraph::new(Span::styled(
                "Soil is in good shape - keep current practices",
                Theme::success(),
            ))
            .render(inner, buf);
            return;
        }

        let mut lines = Vec::new();
        for note in &self.report.recommendations {
            lines.push(Line::from(vec![
                Span::styled("⚠ ", Theme::warning()),
                Span::styled(note, Theme::normal()),
            ]));
        }
        for step in &self.report.improvements {
            lines.push(Line::from(vec![
                Span::styled("→ ", Theme::success()),
                Span::styled(step, Theme::normal()),
            ]));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }

    fn render_plan(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(
                "Fertilizer Plan (total ₹{})",
                self.plan.total_cost
            ))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(block.inner(area));
        block.render(area, buf);

        if self.plan.doses.is_empty() {
            Paragraph::new(Span::styled("No fertilizer needed", Theme::dim()))
                .render(halves[0], buf);
        } else {
            let rows: Vec<Row> = self
                .plan
                .doses
                .iter()
                .map(|d| {
                    Row::new(vec![
                        Cell::from(d.name),
                        Cell::from(format!("{} {}", d.amount, d.unit))
                            .style(Theme::highlight()),
                        Cell::from(d.timing).style(Theme::dim()),
                    ])
                })
                .collect();
            let widths = [
                Constraint::Length(20),
                Constraint::Length(12),
                Constraint::Min(10),
            ];
            Table::new(rows, widths).render(halves[0], buf);
        }

        let schedule: Vec<Line> = self
            .plan
            .schedule
            .iter()
            .map(|step| {
                Line::from(vec![
                    Span::styled(format!("{}: ", step.when), Theme::dim()),
                    Span::styled(step.activity, Theme::normal()),
                ])
            })
            .collect();
        Paragraph::new(schedule)
            .wrap(Wrap { trim: true })
            .render(halves[1], buf);
    }
}

fn band_row(label: &str, value: String, points: u32, max: u32) -> Row<'_> {
    let style = if points == max {
        Theme::success()
    } else if points * 2 >= max {
        Theme::warning()
    } else {
        Theme::error()
    };
    Row::new(vec![
        Cell::from(label),
        Cell::from(value),
        Cell::from(format!("{}/{}", points, max)).style(style),
    ])
}
