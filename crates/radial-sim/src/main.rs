use clap::{Parser, Subcommand};
use radial_sim::config;
use radial_sim::events::AppEvent;
use radial_sim::sim::Simulation;
use radial_sim::sys::runtime;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "radial-sim", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file to use instead of the default location
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Drive the menus from JSON frames on stdin (default)
    Run {
        /// Reload when the config file changes
        #[arg(short = 'w', long)]
        watch: bool,
    },
    /// Write the default config file and print its path
    InitConfig,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config_path = config::resolve_config_path(cli.config)?;

    match cli.command.unwrap_or(Commands::Run { watch: false }) {
        Commands::InitConfig => {
            if config_path.exists() {
                anyhow::bail!("{} already exists", config_path.display());
            }
            config::write_default_config(&config_path)?;
            println!("{}", config_path.display());
            Ok(())
        }
        Commands::Run { watch } => run(config_path, watch),
    }
}

fn run(config_path: PathBuf, watch: bool) -> anyhow::Result<()> {
    log::info!("Using config at {}", config_path.display());
    let mut sim = Simulation::new(config::load_or_default(&config_path));

    let (tx, rx) = async_channel::bounded(32);
    runtime::start_background_services(tx, watch.then(|| config_path.clone()));

    let mut out = std::io::stdout().lock();
    while let Ok(event) = rx.recv_blocking() {
        match event {
            AppEvent::Frame(frame) => {
                let report = sim.frame(frame);
                serde_json::to_writer(&mut out, &report)?;
                writeln!(out)?;
                out.flush()?;
            }
            AppEvent::ConfigReload => sim.reload(config::load_or_default(&config_path)),
            AppEvent::SessionLoaded => sim.load_session(),
            AppEvent::Quit => break,
        }
    }

    Ok(())
}
