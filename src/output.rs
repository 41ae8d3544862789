//! Plain-terminal rendering for the one-shot subcommands.

use crate::error::Result;
use crate::models::{
    Advisory, Crop, CropRecommendation, Disease, Farmer, FertilizerPlan, FinancialScheme,
    ImprovementEstimate, Language, MarketPrice, Pest, PriceTrend, Severity, SoilHealthReport,
    WeatherSnapshot,
};
use crate::logic::reference::threats;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};
use serde::Serialize;

pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[derive(Serialize)]
pub struct SoilOutput<'a> {
    pub report: &'a SoilHealthReport,
    pub fertilizer_plan: &'a FertilizerPlan,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub improvement: Option<&'a ImprovementEstimate>,
}

#[derive(Serialize)]
pub struct ThreatsOutput<'a> {
    pub diseases: &'a [&'static Disease],
    pub pests: &'a [&'static Pest],
}

#[derive(Serialize)]
pub struct WeatherOutput<'a> {
    pub weather: &'a WeatherSnapshot,
    pub advisories: &'a [Advisory],
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn render_recommendations(recs: &[CropRecommendation], language: Language) -> String {
    let mut table = new_table();
    table.set_header(vec![
        "Rank",
        "Crop",
        "Score",
        "Sow",
        "Harvest",
        "Yield (kg/acre)",
        "Revenue (₹)",
        "Why",
    ]);

    for (idx, rec) in recs.iter().enumerate() {
        let pct = rec.score_percent();
        let score_cell = if pct >= 80 {
            Cell::new(format!("{}%", pct)).fg(Color::Green)
        } else {
            Cell::new(format!("{}%", pct)).fg(Color::Yellow)
        };
        table.add_row(Row::from(vec![
            Cell::new(idx + 1),
            Cell::new(rec.crop.display_name(language)),
            score_cell,
            Cell::new(rec.sowing_date.format("%Y-%m-%d")),
            Cell::new(rec.harvest_date.format("%Y-%m-%d")),
            Cell::new(rec.expected_yield_kg),
            Cell::new(format!("{:.0}", rec.estimated_profit)),
            Cell::new(rec.reasons.join("; ")),
        ]));
    }
    table.to_string()
}

pub fn render_soil(report: &SoilHealthReport, plan: &FertilizerPlan) -> String {
    let mut out = format!(
        "Soil health: {}/100 ({})\n",
        report.overall_score, report.status
    );

    let sub = &report.sub_scores;
    let mut bands = new_table();
    bands.set_header(vec!["pH", "Organic matter", "N", "P", "K", "Moisture"]);
    bands.add_row(vec![
        format!("{}/25", sub.ph),
        format!("{}/25", sub.organic_matter),
        format!("{}/10", sub.nitrogen),
        format!("{}/10", sub.phosphorus),
        format!("{}/10", sub.potassium),
        format!("{}/20", sub.moisture),
    ]);
    out.push_str(&bands.to_string());
    out.push('\n');

    for note in &report.recommendations {
        out.push_str(&format!("  ! {}\n", note));
    }
    for step in &report.improvements {
        out.push_str(&format!("  - {}\n", step));
    }

    if plan.doses.is_empty() {
        out.push_str("\nNo fertilizer needed.\n");
    } else {
        let mut doses = new_table();
        doses.set_header(vec!["Fertilizer", "Amount", "When"]);
        for d in &plan.doses {
            doses.add_row(vec![
                d.name.to_string(),
                format!("{} {}", d.amount, d.unit),
                d.timing.to_string(),
            ]);
        }
        out.push('\n');
        out.push_str(&doses.to_string());
        out.push_str(&format!("\nEstimated cost: ₹{}\n", plan.total_cost));
    }

    out.push_str("\nSchedule:\n");
    for step in &plan.schedule {
        out.push_str(&format!("  {}: {}\n", step.when, step.activity));
    }
    out
}

pub fn render_improvement(estimate: &ImprovementEstimate, farm_size: f64) -> String {
    format!(
        "Improvement plan ({:?}) for {} acres: ₹{}, {}, expect {}",
        estimate.level, farm_size, estimate.cost, estimate.timeline, estimate.expected_improvement
    )
}

pub fn render_weather(weather: &WeatherSnapshot, advisories: &[Advisory]) -> String {
    let mut out = format!(
        "{:.1}°C, {:.0}% humidity, {:.1}mm rain, wind {:.0} km/h, {:.0} hPa [{}]\n",
        weather.temperature_c,
        weather.humidity_pct,
        weather.rainfall_mm,
        weather.wind_speed,
        weather.pressure_hpa,
        weather.source
    );

    let mut forecast = new_table();
    forecast.set_header(vec!["Date", "Min", "Max", "Humidity", "Rain", "Conditions"]);
    for day in &weather.forecast {
        forecast.add_row(vec![
            day.date.format("%a %d %b").to_string(),
            format!("{:.1}°C", day.temp_min_c),
            format!("{:.1}°C", day.temp_max_c),
            format!("{:.0}%", day.humidity_pct),
            format!("{:.1}mm", day.rainfall_mm),
            day.condition.to_string(),
        ]);
    }
    out.push_str(&forecast.to_string());
    out.push('\n');

    if advisories.is_empty() {
        out.push_str("No alerts.\n");
        return out;
    }

    let mut table = new_table();
    table.set_header(vec!["Severity", "Category", "Advisory", "Action"]);
    for a in advisories {
        let severity_cell = match a.severity {
            Severity::Critical => Cell::new(a.severity.as_str()).fg(Color::Red),
            Severity::Warning => Cell::new(a.severity.as_str()).fg(Color::Yellow),
            _ => Cell::new(a.severity.as_str()),
        };
        table.add_row(Row::from(vec![
            severity_cell,
            Cell::new(a.category.as_str()),
            Cell::new(format!("{}: {}", a.title, a.description)),
            Cell::new(a.suggested_action.as_deref().unwrap_or("-")),
        ]));
    }
    out.push_str(&table.to_string());
    out
}

pub fn render_market(prices: &[MarketPrice]) -> String {
    let mut table = new_table();
    table.set_header(vec![
        "Commodity",
        "Price",
        "Per kg",
        "Trend",
        "Date",
        "Market",
    ]);
    for p in prices {
        let trend_cell = match p.trend {
            PriceTrend::Up => Cell::new("up").fg(Color::Green),
            PriceTrend::Down => Cell::new("down").fg(Color::Red),
            PriceTrend::Stable => Cell::new("stable"),
        };
        table.add_row(Row::from(vec![
            Cell::new(&p.crop_name),
            Cell::new(format!("₹{:.2}/{}", p.price, p.unit.as_str())),
            Cell::new(format!("₹{:.2}", p.price_per_kg())),
            trend_cell,
            Cell::new(p.date.format("%d/%m/%Y")),
            Cell::new(&p.location),
        ]));
    }
    table.to_string()
}

pub fn render_catalog(crops: &[Crop], language: Language) -> String {
    let mut table = new_table();
    table.set_header(vec![
        "Id",
        "Name",
        "Season",
        "Days",
        "Water",
        "Soils",
        "Temp (°C)",
        "Yield (kg/acre)",
        "Price (₹/kg)",
    ]);
    for c in crops {
        let soils = c
            .soil_types
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            c.id.to_string(),
            c.display_name(language).to_string(),
            c.season.label().to_string(),
            c.duration_days.to_string(),
            c.water_requirement.to_string(),
            soils,
            format!(
                "{:.0}-{:.0}",
                c.temperature_range.min, c.temperature_range.max
            ),
            format!("{:.0}", c.yield_kg),
            format!("{:.1}", c.market_price),
        ]);
    }
    table.to_string()
}

pub fn render_crop(crop: &Crop) -> String {
    let soils = crop
        .soil_types
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let mut out = format!(
        "{} ({}) [{}]\n  Season: {}\n  Duration: {} days\n  Water: {}\n  Soils: {}\n  Temperature: {:.0}-{:.0}°C\n  Yield: {:.0} kg/acre\n  Price: ₹{:.1}/kg",
        crop.name,
        crop.name_hindi,
        crop.id,
        crop.season.label(),
        crop.duration_days,
        crop.water_requirement,
        soils,
        crop.temperature_range.min,
        crop.temperature_range.max,
        crop.yield_kg,
        crop.market_price
    );

    let (diseases, pests) = threats(Some(crop.id));
    let names: Vec<&str> = diseases
        .iter()
        .map(|d| d.name)
        .chain(pests.iter().map(|p| p.name))
        .collect();
    if !names.is_empty() {
        out.push_str(&format!("\n  Watch for: {}", names.join(", ")));
    }
    out
}

pub fn render_threats(diseases: &[&Disease], pests: &[&Pest], language: Language) -> String {
    let mut out = String::new();

    if !diseases.is_empty() {
        let mut table = new_table();
        table.set_header(vec!["Disease", "Crops", "Symptoms", "Treatment", "Prevention"]);
        for d in diseases {
            table.add_row(vec![
                d.display_name(language).to_string(),
                d.affected_crops.join(", "),
                d.symptoms.join("\n"),
                d.treatment.join("\n"),
                d.prevention.join("\n"),
            ]);
        }
        out.push_str(&table.to_string());
        out.push('\n');
    }

    if !pests.is_empty() {
        let mut table = new_table();
        table.set_header(vec!["Pest", "Crops", "Description", "Damage", "Control"]);
        for p in pests {
            table.add_row(vec![
                p.display_name(language).to_string(),
                p.affected_crops.join(", "),
                p.description.to_string(),
                p.damage.join("\n"),
                p.control.join("\n"),
            ]);
        }
        out.push_str(&table.to_string());
        out.push('\n');
    }

    if out.is_empty() {
        out.push_str("No known diseases or pests.\n");
    }
    out
}

pub fn render_schemes(schemes: &[FinancialScheme], language: Language) -> String {
    let mut out = String::new();
    for s in schemes {
        out.push_str(&format!("{} [{}]\n  {}\n", s.display_name(language), s.id, s.description));
        out.push_str("  Eligibility:\n");
        for item in s.eligibility {
            out.push_str(&format!("    - {}\n", item));
        }
        out.push_str("  Benefits:\n");
        for item in s.benefits {
            out.push_str(&format!("    - {}\n", item));
        }
        out.push_str("  How to apply:\n");
        for (i, step) in s.application_steps.iter().enumerate() {
            out.push_str(&format!("    {}. {}\n", i + 1, step));
        }
        out.push_str(&format!("  Contact: {}\n\n", s.contact));
    }
    out
}

pub fn render_farmers(farmers: &[Farmer], current: Option<&str>) -> String {
    let mut table = new_table();
    table.set_header(vec!["", "Name", "Email", "Location", "Acres", "Language", "Since"]);
    for f in farmers {
        let marker = if current == Some(f.id.as_str()) { "*" } else { "" };
        table.add_row(vec![
            marker.to_string(),
            f.name.clone(),
            f.email.clone(),
            f.location.label(),
            f.farm_size.to_string(),
            f.language.code().to_string(),
            f.created_at.format("%Y-%m-%d").to_string(),
        ]);
    }
    table.to_string()
}

pub fn render_farmer(farmer: &Farmer) -> String {
    format!(
        "{} <{}>\n  Phone: {}\n  Farm: {} ({} acres)\n  Experience: {} years\n  Language: {}",
        farmer.name,
        farmer.email,
        farmer.phone,
        farmer.location.label(),
        farmer.farm_size,
        farmer.experience,
        farmer.language.native_name()
    )
}
