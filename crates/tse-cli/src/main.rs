//! Command-line host for the Timberborn save editor.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use tse_core::{EditorConfig, RowAxis};

#[derive(Parser)]
#[command(
    name = "tse",
    about = "Inspect, edit and mesh Timberborn saves",
    version,
    propagate_version = true
)]
struct Cli {
    /// Map dimension whose size is the grid row length
    #[arg(long, value_enum, global = true, default_value_t = Rows::Width)]
    rows: Rows,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Rows {
    /// Rows run along Size.X
    Width,
    /// Rows run along Size.Y
    Height,
}

impl From<Rows> for RowAxis {
    fn from(rows: Rows) -> Self {
        match rows {
            Rows::Width => RowAxis::Width,
            Rows::Height => RowAxis::Height,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show map size and entity counts
    Info {
        /// Save file (JSON)
        save: PathBuf,
    },

    /// List editable entities
    List {
        /// Save file (JSON)
        save: PathBuf,

        /// Only these templates (repeatable)
        #[arg(short, long)]
        template: Vec<String>,
    },

    /// Edit a beaver and export the modified save
    Edit {
        /// Save file (JSON)
        save: PathBuf,

        /// Entity id of the beaver
        #[arg(long)]
        id: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// Set a need, e.g. `Hunger=0.8` (repeatable)
        #[arg(long = "need", value_name = "NAME=POINTS")]
        needs: Vec<String>,

        /// Output path (default: "<save> MODDED <date> <time>.json" next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build every render batch and print statistics
    Mesh {
        /// Save file (JSON)
        save: PathBuf,

        /// Also write the batches as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();
    let config = EditorConfig::default().with_row_axis(cli.rows.into());

    let result = match cli.command {
        Commands::Info { save } => commands::info::run(&save, &config),
        Commands::List { save, template } => commands::list::run(&save, &config, &template),
        Commands::Edit {
            save,
            id,
            name,
            needs,
            output,
        } => commands::edit::run(
            &save,
            &config,
            &commands::edit::EditArgs {
                id: &id,
                name: name.as_deref(),
                needs: &needs,
                output: output.as_deref(),
            },
        ),
        Commands::Mesh { save, output } => commands::mesh::run(&save, &config, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
