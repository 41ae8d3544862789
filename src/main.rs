mod app;
mod cli;
mod config;
mod datasources;
mod db;
mod error;
mod logic;
mod models;
mod output;
mod ui;

use app::{App, Screen};
use clap::Parser;
use cli::{
    Cli, Commands, CropsArgs, MarketArgs, PestsArgs, ProfileArgs, RecommendArgs, SoilArgs,
    WeatherArgs,
};
use config::Config;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use db::Database;
use dialoguer::{Confirm, Input, Password, Select};
use error::{CropOpsError, Result};
use logic::catalog::{crop_catalog, find_crop};
use logic::data_sync::ConnectionStatus;
use logic::fertilizer::improvement_estimate;
use logic::reference::{schemes, threats};
use logic::validation::validate_profile;
use logic::{CropScorer, DataSyncService, RulesEngine, ScoringMode};
use models::{ImprovementLevel, Language, Location, Registration};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use ui::screens::{CropsScreen, DashboardScreen, MarketScreen, SoilScreen, WeatherScreen};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // RUST_LOG wins unless -v was given
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_ref();
    let data_dir = cli.data_dir.as_ref();

    match cli.command {
        None => {
            let config = if Config::exists(config_path) {
                Config::load(config_path)?
            } else {
                Config::setup_interactive(config_path)?.0
            };
            let db = Database::open(&Config::db_path(data_dir)?)?;
            run_dashboard(config, db).await
        }
        Some(Commands::Init) => {
            Config::setup_interactive(config_path)?;
            Ok(())
        }
        Some(Commands::Check) => check(Config::load(config_path)?, data_dir).await,
        Some(Commands::Recommend(args)) => {
            let (config, db) = open(config_path, data_dir)?;
            recommend(config, db, args).await
        }
        Some(Commands::Soil(args)) => {
            let (config, db) = open(config_path, data_dir)?;
            soil(config, db, args)
        }
        Some(Commands::Weather(args)) => {
            let (config, db) = open(config_path, data_dir)?;
            weather(config, db, args).await
        }
        Some(Commands::Market(args)) => {
            let (config, db) = open(config_path, data_dir)?;
            market(config, db, args).await
        }
        Some(Commands::Crops(args)) => {
            let (config, db) = open(config_path, data_dir)?;
            crops(config, db, args)
        }
        Some(Commands::Pests(args)) => {
            let (config, db) = open(config_path, data_dir)?;
            pests(config, db, args)
        }
        Some(Commands::Schemes(args)) => {
            if args.json {
                println!("{}", output::render_json(schemes())?);
                return Ok(());
            }
            let (config, db) = open(config_path, data_dir)?;
            let app = App::new(config, db)?;
            print!("{}", output::render_schemes(schemes(), app.language()));
            Ok(())
        }
        Some(Commands::Register) => {
            let (config, db) = open(config_path, data_dir)?;
            register(&config, &db)
        }
        Some(Commands::Login { email }) => {
            let (_, db) = open(config_path, data_dir)?;
            let farmer = db.login(&email)?;
            println!("Welcome back, {}!", farmer.name);
            Ok(())
        }
        Some(Commands::Logout) => {
            let (_, db) = open(config_path, data_dir)?;
            db.logout()?;
            println!("Signed out.");
            Ok(())
        }
        Some(Commands::Whoami) => {
            let (_, db) = open(config_path, data_dir)?;
            match db.current_farmer()? {
                Some(farmer) => println!("{}", output::render_farmer(&farmer)),
                None => println!("Not signed in. Use `cropops login <email>` or `cropops register`."),
            }
            Ok(())
        }
        Some(Commands::Profile(args)) => {
            let (_, db) = open(config_path, data_dir)?;
            profile(&db, args)
        }
        Some(Commands::Unregister { yes }) => {
            let (_, db) = open(config_path, data_dir)?;
            unregister(&db, yes)
        }
        Some(Commands::Farmers(args)) => {
            let (_, db) = open(config_path, data_dir)?;
            let farmers = db.list_farmers()?;
            if args.json {
                println!("{}", output::render_json(&farmers)?);
            } else if farmers.is_empty() {
                println!("No farmers registered.");
            } else {
                let current = db.current_farmer()?.map(|f| f.id);
                println!("{}", output::render_farmers(&farmers, current.as_deref()));
            }
            Ok(())
        }
    }
}

/// Config and database for the one-shot commands. A missing config file falls
/// back to defaults so they work before `cropops init`.
fn open(config_path: Option<&PathBuf>, data_dir: Option<&PathBuf>) -> Result<(Config, Database)> {
    let config = if Config::exists(config_path) {
        Config::load(config_path)?
    } else {
        tracing::warn!("No config file found - using defaults. Run `cropops init` to set up.");
        Config::default()
    };
    let db = Database::open(&Config::db_path(data_dir)?)?;
    Ok((config, db))
}

async fn check(config: Config, data_dir: Option<&PathBuf>) -> Result<()> {
    println!("Config OK: {}", config.farm.name);
    println!("  Location: {}", config.farm.location.label());
    println!(
        "  Farm size: {} acres, season: {}, scoring: {:?}",
        config.farm.farm_size, config.farm.season, config.scoring.mode
    );

    let db = Database::open(&Config::db_path(data_dir)?)?;
    println!(
        "Database OK: {} (schema v{})",
        db.path().display(),
        db::migrations::latest_version()
    );

    let rules: Vec<&str> = RulesEngine::new()
        .list_rules()
        .into_iter()
        .map(|(id, _)| id)
        .collect();
    println!("Advisory rules: {}", rules.join(", "));

    let sync = DataSyncService::new(&config, db);
    let status = sync.check_connections(&config.farm.location).await;
    println!("{}", connection_summary(&status));

    if !status.all_configured_connected() {
        return Err(CropOpsError::DataSourceUnavailable(
            "one or more configured sources failed".into(),
        ));
    }
    Ok(())
}

fn connection_summary(status: &ConnectionStatus) -> String {
    let describe = |s: Option<bool>| match s {
        Some(true) => "OK",
        Some(false) => "OFFLINE",
        None => "not configured",
    };
    format!(
        "OpenWeatherMap: {} | Market: {}",
        describe(status.openweathermap),
        describe(status.market)
    )
}

async fn recommend(config: Config, db: Database, args: RecommendArgs) -> Result<()> {
    let today = App::today();
    let sync = DataSyncService::new(&config, db.clone());
    let app = App::new(config, db)?;

    let mode = if args.strict {
        ScoringMode::Strict
    } else {
        app.config.scoring.mode
    };
    let season = args.season.unwrap_or_else(|| app.season.clone());
    let farm_size = args.farm_size.unwrap_or(app.farm_size);
    let weather = sync.refresh_weather(&app.location, today).await;

    let scorer = CropScorer::new(crop_catalog(), mode);
    let recs = scorer.recommend(
        &app.location,
        &app.soil,
        &weather,
        farm_size,
        &season,
        today,
    )?;

    if args.json {
        println!("{}", output::render_json(&recs)?);
    } else if recs.is_empty() {
        println!("No crop scores above 60% for {} season at {}.", season, app.location.label());
    } else {
        println!(
            "{} season, {} acres at {} (weather: {}, scoring: {:?})",
            season,
            farm_size,
            app.location.label(),
            weather.source,
            scorer.mode()
        );
        println!("{}", output::render_recommendations(&recs, app.language()));
    }
    Ok(())
}

fn soil(config: Config, db: Database, args: SoilArgs) -> Result<()> {
    let mut app = App::new(config, db)?;
    if let Some(size) = args.farm_size {
        app.farm_size = size;
        app.recompute();
    }

    let improvement = match args.improve.as_deref() {
        Some(level) => {
            let level = ImprovementLevel::from_str(level).ok_or_else(|| {
                CropOpsError::InvalidData(format!(
                    "unknown improvement level '{}' (expected basic, moderate or comprehensive)",
                    level
                ))
            })?;
            Some(improvement_estimate(level, app.farm_size))
        }
        None => None,
    };

    if args.json {
        let out = output::SoilOutput {
            report: &app.soil_report,
            fertilizer_plan: &app.fertilizer_plan,
            improvement: improvement.as_ref(),
        };
        println!("{}", output::render_json(&out)?);
    } else {
        println!("{}", output::render_soil(&app.soil_report, &app.fertilizer_plan));
        if let Some(estimate) = &improvement {
            println!("{}", output::render_improvement(estimate, app.farm_size));
        }
    }
    Ok(())
}

async fn weather(config: Config, db: Database, args: WeatherArgs) -> Result<()> {
    let sync = DataSyncService::new(&config, db.clone());
    let mut app = App::new(config, db)?;
    let snapshot = sync.refresh_weather(&app.location, App::today()).await;
    app.update_weather(snapshot);

    if let Some(rule_id) = args.rule.as_deref() {
        let known = app.rules_engine.list_rules();
        if !known.iter().any(|(id, _)| *id == rule_id) {
            let ids: Vec<&str> = known.iter().map(|(id, _)| *id).collect();
            return Err(CropOpsError::NotFound(format!(
                "rule '{}' (available: {})",
                rule_id,
                ids.join(", ")
            )));
        }
        app.advisories = app
            .rules_engine
            .evaluate_rule(rule_id, &app.weather)
            .into_iter()
            .collect();
    }

    if args.json {
        let out = output::WeatherOutput {
            weather: &app.weather,
            advisories: &app.advisories,
        };
        println!("{}", output::render_json(&out)?);
    } else {
        println!("{}", app.location.label());
        println!("{}", output::render_weather(&app.weather, &app.advisories));
    }
    Ok(())
}

async fn market(config: Config, db: Database, args: MarketArgs) -> Result<()> {
    let sync = DataSyncService::new(&config, db);
    let prices = sync
        .refresh_market(args.crop.as_deref(), App::today())
        .await;

    if args.json {
        println!("{}", output::render_json(&prices)?);
    } else if prices.is_empty() {
        println!("No prices found.");
    } else {
        println!("{}", output::render_market(&prices));
    }
    Ok(())
}

fn crops(config: Config, db: Database, args: CropsArgs) -> Result<()> {
    if let Some(id) = args.id.as_deref() {
        let crop = find_crop(id).ok_or_else(|| CropOpsError::NotFound(format!("Crop '{}'", id)))?;
        if args.json {
            println!("{}", output::render_json(crop)?);
        } else {
            println!("{}", output::render_crop(crop));
        }
        return Ok(());
    }

    if args.json {
        println!("{}", output::render_json(crop_catalog())?);
        return Ok(());
    }
    let app = App::new(config, db)?;
    println!("{}", output::render_catalog(crop_catalog(), app.language()));
    Ok(())
}

fn pests(config: Config, db: Database, args: PestsArgs) -> Result<()> {
    if let Some(id) = args.crop.as_deref() {
        if find_crop(id).is_none() {
            return Err(CropOpsError::NotFound(format!("Crop '{}'", id)));
        }
    }

    let (diseases, pests) = threats(args.crop.as_deref());
    if args.json {
        let out = output::ThreatsOutput {
            diseases: &diseases,
            pests: &pests,
        };
        println!("{}", output::render_json(&out)?);
        return Ok(());
    }

    let app = App::new(config, db)?;
    print!("{}", output::render_threats(&diseases, &pests, app.language()));
    Ok(())
}

fn signed_in(db: &Database) -> Result<models::Farmer> {
    db.current_farmer()?
        .ok_or_else(|| CropOpsError::NotFound("signed-in farmer (run `cropops login <email>`)".into()))
}

fn profile(db: &Database, args: ProfileArgs) -> Result<()> {
    let mut farmer = signed_in(db)?;

    if let Some(name) = args.name {
        farmer.name = name;
    }
    if let Some(phone) = args.phone {
        farmer.phone = phone;
    }
    if let Some(size) = args.farm_size {
        farmer.farm_size = size;
    }
    if let Some(years) = args.experience {
        farmer.experience = years;
    }
    if let Some(code) = args.language.as_deref() {
        farmer.language = Language::from_str(code).ok_or_else(|| {
            CropOpsError::InvalidData(format!("unknown language '{}'", code))
        })?;
    }

    validate_profile(&farmer)?;
    db.update_farmer(&farmer)?;
    println!("{}", output::render_farmer(&farmer));
    Ok(())
}

fn unregister(db: &Database, yes: bool) -> Result<()> {
    let farmer = signed_in(db)?;

    let confirmed = yes
        || Confirm::new()
            .with_prompt(format!("Delete {} <{}>?", farmer.name, farmer.email))
            .default(false)
            .interact()
            .map_err(input_error)?;
    if !confirmed {
        println!("Cancelled.");
        return Ok(());
    }

    db.delete_farmer(&farmer.id)?;
    println!("Removed {}.", farmer.name);
    Ok(())
}

fn input_error(e: dialoguer::Error) -> CropOpsError {
    CropOpsError::Config(format!("Input error: {}", e))
}

fn register(config: &Config, db: &Database) -> Result<()> {
    let defaults = &config.farm.location;

    let name: String = Input::new()
        .with_prompt("Full name")
        .interact_text()
        .map_err(input_error)?;
    let email: String = Input::new()
        .with_prompt("Email")
        .interact_text()
        .map_err(input_error)?;
    let phone: String = Input::new()
        .with_prompt("Mobile number")
        .interact_text()
        .map_err(input_error)?;
    let password = Password::new()
        .with_prompt("Password")
        .interact()
        .map_err(input_error)?;
    let confirm_password = Password::new()
        .with_prompt("Confirm password")
        .interact()
        .map_err(input_error)?;
    let state: String = Input::new()
        .with_prompt("State")
        .default(defaults.state.clone())
        .interact_text()
        .map_err(input_error)?;
    let district: String = Input::new()
        .with_prompt("District")
        .default(defaults.district.clone())
        .interact_text()
        .map_err(input_error)?;
    let village: String = Input::new()
        .with_prompt("Village")
        .default(defaults.village.clone())
        .interact_text()
        .map_err(input_error)?;
    let farm_size: f64 = Input::new()
        .with_prompt("Farm size (acres)")
        .default(config.farm.farm_size)
        .interact_text()
        .map_err(input_error)?;
    let experience: i64 = Input::new()
        .with_prompt("Years of farming experience")
        .default(0)
        .interact_text()
        .map_err(input_error)?;

    let languages = [Language::En, Language::Hi, Language::Pa, Language::Regional];
    let language_names: Vec<&str> = languages.iter().map(|l| l.native_name()).collect();
    let language_idx = Select::new()
        .with_prompt("Language")
        .items(&language_names)
        .default(0)
        .interact()
        .map_err(input_error)?;

    let registration = Registration {
        name,
        email,
        phone,
        password,
        confirm_password,
        location: Location {
            state,
            district,
            village,
            coordinates: defaults.coordinates,
        },
        farm_size,
        experience,
        language: languages[language_idx],
    };

    let farmer = db.register_farmer(&registration)?;
    println!("Welcome, {}! You are now signed in.", farmer.name);
    Ok(())
}

async fn run_dashboard(config: Config, db: Database) -> Result<()> {
    let data_sync = DataSyncService::new(&config, db.clone());
    let mut app = App::new(config, db)?;

    let status = data_sync.check_connections(&app.location).await;
    let today = App::today();
    let snapshot = data_sync.refresh_weather(&app.location, today).await;
    app.update_weather(snapshot);
    let prices = data_sync.refresh_market(None, today).await;
    app.update_market(prices);
    if status.any_connected() {
        app.set_status(&connection_summary(&status));
    } else {
        app.set_status("Offline - showing cached or sample data");
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &data_sync).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    data_sync: &DataSyncService,
) -> Result<()>
where
    CropOpsError: From<B::Error>,
{
    loop {
        terminal.draw(|f| {
            let area = f.area();

            match app.screen {
                Screen::Dashboard => {
                    let label = app.farm_label();
                    let alerts = app.alerts();
                    let screen = DashboardScreen::new(
                        &label,
                        &app.season,
                        &app.weather,
                        &app.recommendations,
                        &alerts,
                        &app.soil_report,
                    )
                    .with_status(app.status_message.as_deref());
                    f.render_widget(screen, area);
                }
                Screen::Weather => {
                    let screen = WeatherScreen::new(&app.weather, &app.advisories);
                    f.render_widget(screen, area);
                }
                Screen::Crops => {
                    let screen = CropsScreen::new(&app.recommendations, &app.season)
                        .with_selection(app.crops_state.selected_index)
                        .with_language(app.language())
                        .with_error(app.scoring_error.as_deref());
                    f.render_widget(screen, area);
                }
                Screen::Soil => {
                    let screen = SoilScreen::new(&app.soil, &app.soil_report, &app.fertilizer_plan);
                    f.render_widget(screen, area);
                }
                Screen::Market => {
                    let screen = MarketScreen::new(&app.market_prices)
                        .with_selection(app.market_state.selected_index);
                    f.render_widget(screen, area);
                }
            }
        })?;

        // Poll with a timeout so refresh requests are picked up promptly
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') => app.quit(),
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        app.quit();
                    }
                    KeyCode::Esc => app.switch_screen(Screen::Dashboard),
                    KeyCode::Char('r') => app.request_refresh(),
                    KeyCode::Char('s') => app.cycle_season(),
                    KeyCode::Char(c) => {
                        if let Some(screen) = Screen::from_key(c) {
                            app.switch_screen(screen);
                        }
                    }
                    code => handle_list_input(app, code),
                }
            }
        }

        if app.needs_refresh {
            app.needs_refresh = false;
            app.refreshing = true;
            let today = App::today();
            let snapshot = data_sync.refresh_weather(&app.location, today).await;
            let source = snapshot.source;
            app.update_weather(snapshot);
            let prices = data_sync.refresh_market(None, today).await;
            app.update_market(prices);
            app.set_status(&format!("Data refreshed (weather: {})", source));
            app.refreshing = false;
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_list_input(app: &mut App, code: KeyCode) {
    match app.screen {
        Screen::Crops => {
            let count = app.recommendations.len();
            match code {
                KeyCode::Up => app.crops_state.prev(),
                KeyCode::Down => app.crops_state.next(count),
                _ => {}
            }
        }
        Screen::Market => {
            let count = app.market_prices.len();
            match code {
                KeyCode::Up => app.market_state.prev(),
                KeyCode::Down => app.market_state.next(count),
                _ => {}
            }
        }
        _ => {}
    }
}
