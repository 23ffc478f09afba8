//! Command-line interface for tilesnap
//!
//! Lists and validates the hotkey table, resolves tile rectangles for a
//! given work area and drives the tiling controller against a simulated
//! desktop.

use crate::config::{shortcut_token_string, BindingStore, ConfigParser};
use crate::logging::{init_logging, LogConfig};
use crate::models::{Axis, AxisSet, BorderInsets, HotkeyBinding, Rect, SliceScheme, TileAction};
use crate::platform::{SimulatedWindow, SimulatedWindowSystem, StatusFeed};
use crate::services::{ActionTable, TileOutcome, TileResolver, TilingController};
use crate::{Result, TileSnapError};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, error, info, warn};

/// tilesnap command-line interface
#[derive(Parser, Debug)]
#[command(name = "tilesnap")]
#[command(about = "Snap the focused window into halves, thirds and quarters of its monitor")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct TileSnapCli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Bindings file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable JSON output for machine-readable results
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the effective hotkey table
    Bindings,

    /// Print the rectangle an action resolves to, before border compensation
    Resolve(ResolveArgs),

    /// Dispatch shortcuts read from stdin against a simulated desktop
    Simulate(SimulateArgs),

    /// Bindings file management
    Config(ConfigCommands),
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Monitor work area as left,top,right,bottom
    #[arg(long, allow_hyphen_values = true)]
    pub work_area: Rect,

    /// Shortcut to look up, e.g. "ctrl+alt+shift+g"
    #[arg(short, long, conflicts_with = "scheme")]
    pub shortcut: Option<String>,

    /// Slice scheme of an ad-hoc action (full, half, third, fourth)
    #[arg(long, required_unless_present = "shortcut")]
    pub scheme: Option<SliceScheme>,

    /// Axes of an ad-hoc action
    #[arg(long, value_delimiter = ',')]
    pub axes: Vec<Axis>,

    #[arg(long = "h-slot", default_value_t = 0)]
    pub horizontal_slot: u32,

    #[arg(long = "v-slot", default_value_t = 0)]
    pub vertical_slot: u32,
}

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Monitor work area as left,top,right,bottom; repeat for more monitors
    #[arg(long = "work-area", required = true, allow_hyphen_values = true)]
    pub work_areas: Vec<Rect>,

    /// Initial outer frame of the focused window
    #[arg(long, allow_hyphen_values = true)]
    pub window: Rect,

    /// Invisible border widths as left,top,right,bottom
    #[arg(long, default_value = "0,0,0,0")]
    pub insets: BorderInsets,

    /// Title shown in status messages
    #[arg(long, default_value = "Simulated window")]
    pub title: String,
}

#[derive(Args, Debug)]
pub struct ConfigCommands {
    #[command(subcommand)]
    pub action: ConfigActions,
}

#[derive(Subcommand, Debug)]
pub enum ConfigActions {
    /// Write the default bindings file
    Init {
        /// Replace an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Print the effective bindings as TOML
    Show,

    /// Print the bindings file location
    Path,
}

/// CLI command executor
pub struct TileSnapCliExecutor {
    store: BindingStore,
    json_output: bool,
}

impl TileSnapCliExecutor {
    pub fn new(store: BindingStore, json_output: bool) -> Self {
        Self { store, json_output }
    }

    pub async fn execute(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Bindings => self.execute_bindings(),
            Commands::Resolve(args) => self.execute_resolve(args),
            Commands::Simulate(args) => self.execute_simulate(args).await,
            Commands::Config(config_cmd) => self.execute_config_command(config_cmd),
        }
    }

    /// Load the bindings file and build the table, mapping failures to
    /// configuration errors
    fn action_table(&self) -> Result<ActionTable> {
        let bindings = self
            .store
            .load()
            .map_err(|e| TileSnapError::ConfigurationError(e.to_string()))?;
        let table = ActionTable::new(bindings)
            .map_err(|e| TileSnapError::ConfigurationError(e.to_string()))?;
        Ok(table)
    }

    fn execute_bindings(&self) -> Result<()> {
        let table = self.action_table()?;

        if self.json_output {
            let entries: Vec<_> = table.bindings().into_iter().map(binding_json).collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        } else if table.is_empty() {
            println!("No bindings configured.");
        } else {
            println!("Bindings:");
            for binding in table.bindings() {
                println!(
                    "  {:<22} {:<18} {}",
                    binding.shortcut.to_string(),
                    binding.action.describe(),
                    binding.name
                );
            }
        }

        Ok(())
    }

    fn execute_resolve(&self, args: ResolveArgs) -> Result<()> {
        let action = match (&args.shortcut, args.scheme) {
            (Some(shortcut), _) => {
                let parser = ConfigParser::new()?;
                let shortcut = parser.parse_shortcut(shortcut)?;
                let table = self.action_table()?;
                let action = *table.lookup(&shortcut).ok_or_else(|| {
                    TileSnapError::ValidationError(format!("No binding for {}", shortcut))
                })?;
                action
            }
            (None, Some(scheme)) => {
                let axes = args
                    .axes
                    .iter()
                    .fold(AxisSet::EMPTY, |set, axis| set.with(*axis));
                TileAction::new(axes, scheme, args.horizontal_slot, args.vertical_slot)
            }
            (None, None) => {
                return Err(TileSnapError::ValidationError(
                    "either --shortcut or --scheme is required".to_string(),
                )
                .into())
            }
        };

        if !action.slots_in_range() {
            warn!(action = %action.describe(), "Slot outside its scheme");
        }

        if action.is_maximize() {
            if self.json_output {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({
                        "action": action,
                        "maximize": true,
                    }))?
                );
            } else {
                println!("maximize (work area not needed)");
            }
            return Ok(());
        }

        let rect = TileResolver::resolve(args.work_area, &action)
            .map_err(|e| TileSnapError::ValidationError(e.to_string()))?;
        debug!(work_area = %args.work_area, rect = %rect, "Resolved action");

        if self.json_output {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "action": action,
                    "work_area": args.work_area,
                    "rect": rect,
                    "width": rect.width(),
                    "height": rect.height(),
                }))?
            );
        } else {
            println!(
                "{}: {} ({}x{})",
                action.describe(),
                rect,
                rect.width(),
                rect.height()
            );
        }

        Ok(())
    }

    async fn execute_simulate(&self, args: SimulateArgs) -> Result<()> {
        let table = self.action_table()?;
        let parser = ConfigParser::new()?;

        let windows = Arc::new(SimulatedWindowSystem::new(args.work_areas));
        let handle = windows.open_window(SimulatedWindow::new(
            args.title,
            args.window,
            args.insets,
        ));
        let feed = Arc::new(StatusFeed::default());
        let mut controller = TilingController::new(table, windows.clone(), feed.clone());

        info!(window = %handle, "Simulated desktop ready, reading shortcuts from stdin");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            let line = tokio::select! {
                line = lines.next_line() => line?,
                _ = tokio::signal::ctrl_c() => {
                    info!("Received Ctrl+C");
                    break;
                }
            };
            let Some(line) = line else {
                break;
            };

            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let shortcut = match parser.parse_shortcut(line) {
                Ok(shortcut) => shortcut,
                Err(e) => {
                    warn!("Skipping input: {}", e);
                    continue;
                }
            };

            let result = controller.handle_shortcut(&shortcut);
            let frame = windows.window(handle).map(|window| window.frame);

            if self.json_output {
                let (outcome, error) = match &result {
                    Ok(TileOutcome::Unmapped) => ("unmapped", None),
                    Ok(TileOutcome::Maximized { .. }) => ("maximized", None),
                    Ok(TileOutcome::Tiled(_)) => ("tiled", None),
                    Err(e) => ("failed", Some(e.to_string())),
                };
                let event = json!({
                    "shortcut": shortcut_token_string(&shortcut),
                    "outcome": outcome,
                    "error": error,
                    "frame": frame,
                    "status": feed.text(),
                });
                println!("{}", serde_json::to_string(&event)?);
            } else {
                match result {
                    Ok(TileOutcome::Unmapped) => println!("{}: not bound", shortcut),
                    _ => println!("{}\n", feed.text()),
                }
            }
        }

        let metrics = controller.metrics();
        info!(
            events = metrics.events_handled,
            tiled = metrics.tiled,
            maximized = metrics.maximized,
            unmapped = metrics.unmapped_events,
            failures = metrics.failures,
            "Simulation finished"
        );

        Ok(())
    }

    fn execute_config_command(&self, cmd: ConfigCommands) -> Result<()> {
        match cmd.action {
            ConfigActions::Init { force } => {
                let written = self
                    .store
                    .initialize(force)
                    .map_err(|e| TileSnapError::ConfigurationError(e.to_string()))?;
                if written {
                    info!(path = %self.store.path().display(), "Wrote default bindings");
                    println!("Wrote default bindings to {}", self.store.path().display());
                } else {
                    println!(
                        "{} already exists; use --force to overwrite",
                        self.store.path().display()
                    );
                }
            }
            ConfigActions::Show => {
                let table = self.action_table()?;
                let bindings: Vec<HotkeyBinding> =
                    table.bindings().into_iter().cloned().collect();
                if self.json_output {
                    let entries: Vec<_> = bindings.iter().map(binding_json).collect();
                    println!("{}", serde_json::to_string_pretty(&entries)?);
                } else {
                    print!("{}", ConfigParser::to_toml(&bindings)?);
                }
            }
            ConfigActions::Path => {
                if self.json_output {
                    println!(
                        "{}",
                        json!({
                            "path": self.store.path().display().to_string(),
                            "exists": self.store.exists(),
                        })
                    );
                } else {
                    println!("{}", self.store.path().display());
                }
            }
        }

        Ok(())
    }
}

fn binding_json(binding: &HotkeyBinding) -> serde_json::Value {
    json!({
        "name": binding.name,
        "shortcut": shortcut_token_string(&binding.shortcut),
        "action": binding.action,
        "description": binding.action.describe(),
    })
}

/// Parse arguments, set up logging and run the selected command
pub async fn run_cli() -> Result<()> {
    let cli = TileSnapCli::parse();

    let log_config = if cli.verbose {
        LogConfig::development().with_env_overrides()
    } else {
        LogConfig::from_env()
    };
    init_logging(&log_config).map_err(|e| {
        TileSnapError::ConfigurationError(format!("Failed to initialize logging: {}", e))
    })?;

    let store = cli
        .config
        .clone()
        .map(BindingStore::new)
        .unwrap_or_default();
    debug!(path = %store.path().display(), "Using bindings file");

    let executor = TileSnapCliExecutor::new(store, cli.json);

    if let Err(e) = executor.execute(cli.command).await {
        if cli.json {
            let error_json = json!({
                "error": true,
                "message": e.to_string()
            });
            println!("{}", serde_json::to_string_pretty(&error_json)?);
        } else {
            error!("Command failed: {}", e);
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }

    Ok(())
}
