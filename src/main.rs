use clap::Parser;
use elo_edge::cli::{Cli, Commands};
use elo_edge::config::Config;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration, falling back to defaults
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        Config::default()
    });

    // Initialize telemetry
    elo_edge::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Analyze(args) => args.execute(&config),
        Commands::AnalyzeMatch(args) => args.execute(&config),
        Commands::Bet(args) => args.execute(&config),
        Commands::Settle(args) => args.execute(&config),
        Commands::RecordResult(args) => args.execute(&config),
        Commands::SyncResults(args) => args.execute(&config),
        Commands::ImportRatings(args) => args.execute(&config),
        Commands::SetRating(args) => args.execute(&config),
        Commands::Stats(args) => args.execute(&config),
        Commands::ListBets(args) => args.execute(&config),
    }
}
