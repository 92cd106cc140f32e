// Airline Autopilot - Main Entry Point
// Dry-run driver: game state comes from a snapshot, every intent is recorded and printed

use airline_autopilot::client::{
    Am4ToolsDemandSource, GameAction, GameSnapshot, RecordingGameClient, StaticDemandSource,
};
use airline_autopilot::config::DemandSourceConfig;
use airline_autopilot::verbosity::set_verbosity_level;
use airline_autopilot::{
    ActionLedger, AutopilotConfig, CycleStep, Dispatcher, ReferenceData, RouteDemandSource,
    DEFAULT_CONFIG_PATH, DEFAULT_SNAPSHOT_PATH,
};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Candidates served per page by the snapshot feed.
const SNAPSHOT_PAGE_SIZE: usize = 20;

#[derive(Parser)]
#[command(name = "airline_autopilot")]
#[command(about = "Automated management pass for an airline simulation game")]
struct Cli {
    /// Autopilot configuration file (created with defaults when missing)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// JSON game-state snapshot answering the game's reads
    #[arg(long, global = true, default_value = DEFAULT_SNAPSHOT_PATH)]
    snapshot: String,

    /// Query the live route feed at this base URL instead of the snapshot's candidates
    #[arg(long, global = true)]
    demand_url: Option<String>,

    /// Seed for the hub visiting order
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Increase output (-v info, -vv debug and trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one full pass
    Cycle,
    /// Buy fuel and CO2 quota only
    Resources,
    /// Route parked aircraft and order due A-checks
    Fleet,
    /// Buy and configure new aircraft
    Acquire,
    /// Reprice every operated route
    Tickets,
    /// Validate and print the configuration
    ShowConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    set_verbosity_level(cli.verbose);

    let config = AutopilotConfig::load_validated(&cli.config)?;
    if let Commands::ShowConfig = cli.command {
        config.print_summary();
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let reference = ReferenceData::load(&config.reference_path)?;
    let snapshot = GameSnapshot::load(&cli.snapshot)?;

    let source: Box<dyn RouteDemandSource> = match &cli.demand_url {
        Some(url) => {
            let feed = DemandSourceConfig {
                base_url: url.clone(),
                ..config.demand_source.clone()
            };
            Box::new(Am4ToolsDemandSource::new(&feed)?)
        }
        None => Box::new(StaticDemandSource::from_snapshot(&snapshot, SNAPSHOT_PAGE_SIZE)),
    };
    let client = RecordingGameClient::new(snapshot);

    let steps = match cli.command {
        Commands::Cycle => CycleStep::scheduled(&config),
        Commands::Resources => vec![CycleStep::Resources],
        Commands::Fleet => vec![CycleStep::Lifecycle],
        Commands::Acquire => vec![CycleStep::Acquisition],
        Commands::Tickets => vec![CycleStep::Tickets],
        Commands::ShowConfig => Vec::new(),
    };

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut ledger = ActionLedger::new(&config.ledger.path);

    let dispatcher = Dispatcher::new(&client, source.as_ref(), &config, &reference);
    let report = dispatcher.run(&steps, &mut ledger, &mut rng).await?;

    let actions = client.actions();
    println!("\n📝 {} action(s) recorded:", actions.len());
    for action in &actions {
        println!("  {}", describe(action));
    }
    if report.errors > 0 {
        println!("⚠️  {} step error(s), see output above", report.errors);
    }

    Ok(())
}

fn describe(action: &GameAction) -> String {
    match action {
        GameAction::BuyResource { kind, quantity } => format!("{} buy {} {}", kind.icon(), quantity, kind.label()),
        GameAction::Depart => "🛫 depart all".to_string(),
        GameAction::StartCampaign(kind) => format!("📣 start {} campaign", kind),
        GameAction::BuyAircraft { model_id, hub_id, name, split, .. } => {
            format!("✈️ buy model {} at hub {} as {} ({})", model_id, hub_id, name, split)
        }
        GameAction::CreateRoute { aircraft_id, name, destination_airport_id, .. } => {
            format!("🗺️ route aircraft {} as {} to airport {}", aircraft_id, name, destination_airport_id)
        }
        GameAction::ModifyAircraft { aircraft_id, split } => format!("🔩 refit aircraft {} to {}", aircraft_id, split),
        GameAction::CheckAircraft { aircraft_id } => format!("🔧 A-check aircraft {}", aircraft_id),
        GameAction::SetTicketPrice { route_id, prices } => format!("🎫 price route {} at {:?}", route_id, prices),
    }
}
