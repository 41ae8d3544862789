use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cropops", version, about = "Crop advisory dashboard for smallholder farms")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override SQLite data directory
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Re-run interactive setup
    Init,
    /// Validate config and test connections
    Check,
    /// Rank catalog crops for the configured farm
    Recommend(RecommendArgs),
    /// Soil health report and fertilizer plan
    Soil(SoilArgs),
    /// Current weather, forecast and advisories
    Weather(WeatherArgs),
    /// Latest market prices
    Market(MarketArgs),
    /// List the crop catalog, or show one crop
    Crops(CropsArgs),
    /// Disease and pest reference, optionally for one crop
    Pests(PestsArgs),
    /// Government financial support schemes
    Schemes(JsonArg),
    /// Register a farmer and sign in
    Register,
    /// Sign in as an existing farmer
    Login {
        /// Registered email address
        email: String,
    },
    /// Sign out the current farmer
    Logout,
    /// Show the signed-in farmer
    Whoami,
    /// Update the signed-in farmer's profile
    Profile(ProfileArgs),
    /// Delete the signed-in farmer
    Unregister {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// List registered farmers
    Farmers(JsonArg),
}

#[derive(Args)]
pub struct RecommendArgs {
    /// kharif, rabi, zaid or all (defaults to the configured season)
    #[arg(short, long)]
    pub season: Option<String>,

    /// Farm size in acres (defaults to the farmer's or configured size)
    #[arg(short, long)]
    pub farm_size: Option<f64>,

    /// Reject malformed inputs instead of scoring them as no-credit
    #[arg(long)]
    pub strict: bool,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct SoilArgs {
    /// Farm size in acres for the fertilizer plan
    #[arg(short, long)]
    pub farm_size: Option<f64>,

    /// Cost out a soil improvement programme: basic, moderate or comprehensive
    #[arg(long)]
    pub improve: Option<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct MarketArgs {
    /// Only show this commodity
    #[arg(long)]
    pub crop: Option<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct WeatherArgs {
    /// Evaluate a single advisory rule by id
    #[arg(long)]
    pub rule: Option<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CropsArgs {
    /// Crop id, e.g. rice
    pub id: Option<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct PestsArgs {
    /// Only show threats to this crop id
    #[arg(long)]
    pub crop: Option<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ProfileArgs {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    /// Farm size in acres
    #[arg(short, long)]
    pub farm_size: Option<f64>,

    /// Years of farming experience
    #[arg(long)]
    pub experience: Option<u32>,

    /// en, hi, pa or regional
    #[arg(short, long)]
    pub language: Option<String>,
}

#[derive(Args)]
pub struct JsonArg {
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_recommend_flags() {
        let cli = Cli::parse_from([
            "cropops",
            "recommend",
            "--season",
            "rabi",
            "--farm-size",
            "3.5",
            "--strict",
            "-v",
        ]);
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Some(Commands::Recommend(args)) => {
                assert_eq!(args.season.as_deref(), Some("rabi"));
                assert_eq!(args.farm_size, Some(3.5));
                assert!(args.strict);
                assert!(!args.json);
            }
            _ => panic!("expected recommend"),
        }
    }

    #[test]
    fn parses_login_and_market() {
        let cli = Cli::parse_from(["cropops", "login", "ram@example.com"]);
        assert!(matches!(cli.command, Some(Commands::Login { ref email }) if email == "ram@example.com"));

        let cli = Cli::parse_from(["cropops", "market", "--crop", "wheat", "--json"]);
        match cli.command {
            Some(Commands::Market(args)) => {
                assert_eq!(args.crop.as_deref(), Some("wheat"));
                assert!(args.json);
            }
            _ => panic!("expected market"),
        }
    }

    #[test]
    fn parses_profile_and_crop_lookup() {
        let cli = Cli::parse_from(["cropops", "profile", "-f", "6", "--language", "hi"]);
        match cli.command {
            Some(Commands::Profile(args)) => {
                assert_eq!(args.farm_size, Some(6.0));
                assert_eq!(args.language.as_deref(), Some("hi"));
                assert!(args.phone.is_none());
            }
            _ => panic!("expected profile"),
        }

        let cli = Cli::parse_from(["cropops", "crops", "Wheat"]);
        assert!(matches!(cli.command, Some(Commands::Crops(ref a)) if a.id.as_deref() == Some("Wheat")));

        let cli = Cli::parse_from(["cropops", "pests", "--crop", "rice"]);
        assert!(matches!(cli.command, Some(Commands::Pests(ref a)) if a.crop.as_deref() == Some("rice") && !a.json));

        let cli = Cli::parse_from(["cropops", "schemes", "--json"]);
        assert!(matches!(cli.command, Some(Commands::Schemes(ref a)) if a.json));

        let cli = Cli::parse_from(["cropops", "soil", "--improve", "moderate"]);
        assert!(matches!(cli.command, Some(Commands::Soil(ref a)) if a.improve.as_deref() == Some("moderate")));
    }

    #[test]
    fn no_subcommand_launches_dashboard() {
        let cli = Cli::parse_from(["cropops", "-c", "farm.yaml"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.config, Some(PathBuf::from("farm.yaml")));
    }
}
