use crate::models::{MarketPrice, PriceTrend};
use crate::ui::components::nav_bar;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Widget},
};

pub struct MarketScreen<'a> {
    pub prices: &'a [MarketPrice],
    pub selected_index: usize,
}

impl<'a> MarketScreen<'a> {
    pub fn new(prices: &'a [MarketPrice]) -> Self {
        Self {
            prices,
            selected_index: 0,
        }
    }

    pub fn with_selection(mut self, index: usize) -> Self {
        self.selected_index = index;
        self
    }
}

impl Widget for MarketScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(6),    // Price table
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let rising = self
            .prices
            .iter()
            .filter(|p| p.trend == PriceTrend::Up)
            .count();
        let title = Line::from(vec![
            Span::styled("Market Prices", Theme::title()),
            Span::styled(
                format!(" ({} commodities, {} rising)", self.prices.len(), rising),
                Theme::dim(),
            ),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        self.render_table(chunks[1], buf);

        let nav = nav_bar(&[("↑↓", "Navigate"), ("r", "Refresh")]);
        Paragraph::new(nav).render(chunks[2], buf);
    }
}

impl MarketScreen<'_> {
    fn render_table(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Latest Mandi Prices")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        if self.prices.is_empty() {
            let inner = block.inner(area);
            block.render(area, buf);
            Paragraph::new(Span::styled("No prices available", Theme::dim())).render(inner, buf);
            return;
        }

        let header = Row::new(vec![
            Cell::from("Commodity"),
            Cell::from("Price"),
            Cell::from("Per kg"),
            Cell::from("Trend"),
            Cell::from("Date"),
            Cell::from("Market"),
        ])
        .style(Theme::header());

        let rows: Vec<Row> = self
            .prices
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let style = if i == self.selected_index {
                    Theme::selected()
                } else {
                    Style::default()
                };
                Row::new(vec![
                    Cell::from(p.crop_name.as_str()),
                    Cell::from(format!("₹{:.2}/{}", p.price, p.unit.as_str())),
                    Cell::from(format!("₹{:.2}", p.price_per_kg())).style(Theme::highlight()),
                    Cell::from(p.trend.label())
                        .style(Style::default().fg(p.trend.color())),
                    Cell::from(p.date.format("%d/%m/%Y").to_string()),
                    Cell::from(p.location.as_str()).style(Theme::dim()),
                ])
                .style(style)
            })
            .collect();

        let widths = [
            Constraint::Length(24),
            Constraint::Length(18),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Min(10),
        ];

        Table::new(rows, widths)
            .header(header)
            .block(block)
            .render(area, buf);
    }
}
