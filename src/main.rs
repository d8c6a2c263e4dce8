use clap::{Parser, Subcommand};
use leads_dashboard::{config, controller, data, server, types::Selector};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, value_name = "FILE", default_value = "config.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the dashboard (the default)
    Serve,
    /// Print the summary table for one selector without serving
    Report {
        /// Lead name, or "All"
        #[arg(short, long, default_value = "All")]
        name: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let app_config = config::AppConfig::load_or_default(&cli.config)?;

    // Load once; a failure here stops the process before anything is served.
    let dataset = data::load_dataset(&app_config.input).await?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            server::start_server(app_config, dataset).await?;
        }
        Commands::Report { name } => {
            let selector = Selector::parse(&name);
            let artifacts = controller::compute_artifacts(&dataset, &selector, &app_config.map);
            info!(
                "{} map points, {} sources",
                artifacts.map.point_count(),
                artifacts.box_plot.groups.len()
            );

            println!("Selector: {}", artifacts.selector);
            println!("{:<24} {:>16}", "Column", "Average");
            for row in &artifacts.summary {
                println!("{:<24} {:>16.2}", row.column, row.average);
            }
        }
    }

    Ok(())
}
