//! `qualicam`: the QualiCam inventory client for the terminal.
//!
//! Drives the same app core as the phone: scan a code, register or edit
//! the chapa behind it, convert it into a retalho.

mod commands;
mod settings;

use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use commands::Session;

/// QualiCam CLI tool.
#[derive(Parser, Debug)]
#[command(name = "qualicam", about = "QualiCam inventory client")]
struct Cli {
    /// Path to the settings store (default: ~/.qualicam/settings.redb).
    #[arg(long = "settings", global = true)]
    settings: Option<String>,

    /// Request timeout in seconds.
    #[arg(long = "timeout", global = true, default_value_t = 10)]
    timeout: u64,

    /// Output format: table or json.
    #[arg(long = "output", short = 'o', global = true, default_value = "table")]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check the configured server.
    Status,

    /// Show or change the server address.
    Server {
        #[command(subcommand)]
        action: Option<ServerAction>,
    },

    /// Look up a scanned code and report where the app would go.
    Scan {
        /// Barcode payload (five digits).
        code: String,
    },

    /// Register a new chapa.
    Add {
        /// Chapa ID (five digits).
        id: String,
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Change an existing chapa. Omitted fields keep their value.
    Edit {
        /// Chapa ID (five digits).
        id: String,
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Turn a chapa into a retalho (create the retalho, then delete the chapa).
    Convert {
        /// Chapa ID (five digits).
        id: String,
    },

    /// Delete a chapa.
    Delete {
        /// Chapa ID (five digits).
        id: String,
        /// Skip confirmation.
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },

    /// Show one chapa.
    Get {
        /// Chapa ID (five digits).
        id: String,
    },

    /// List chapas or retalhos.
    List {
        #[arg(value_enum)]
        what: ListWhat,
    },

    /// Show version.
    Version,
}

#[derive(Subcommand, Debug)]
enum ServerAction {
    /// Save a new address (`host:port` or a full URL) and test it.
    Set { url: String },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ListWhat {
    Chapas,
    Retalhos,
}

/// Form fields, in form order.
#[derive(clap::Args, Debug)]
struct FieldArgs {
    /// Material name.
    #[arg(long)]
    material: Option<String>,
    /// Supplier.
    #[arg(long)]
    supplier: Option<String>,
    /// Size (m²). Accepts `5.06` or `5,06`.
    #[arg(long)]
    size: Option<String>,
    /// Price. Accepts `289.90` or `289,90`.
    #[arg(long)]
    price: Option<String>,
    /// Storage location.
    #[arg(long)]
    location: Option<String>,
}

impl FieldArgs {
    fn into_values(self) -> Vec<(qualicam_app::Field, String)> {
        use qualicam_app::Field;

        [
            (Field::NomeMaterial, self.material),
            (Field::Fornecedor, self.supplier),
            (Field::Tamanho, self.size),
            (Field::Preco, self.price),
            (Field::Localizacao, self.location),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let settings_path = cli
        .settings
        .map(std::path::PathBuf::from)
        .unwrap_or_else(settings::default_path);
    let json_output = cli.output == "json";

    let timeout = Duration::from_secs(cli.timeout);
    let open = || -> anyhow::Result<Session> {
        let location = settings::open_location(&settings_path, timeout)?;
        Ok(Session::new(location, json_output))
    };

    match cli.command {
        Commands::Status => {
            commands::server::status(&open()?).await?;
        }

        Commands::Server { action } => match action {
            None => commands::server::show(&open()?)?,
            Some(ServerAction::Set { url }) => {
                commands::server::set(&open()?, &url).await?;
            }
        },

        Commands::Scan { code } => {
            commands::chapa::scan(&open()?, &code).await?;
        }

        Commands::Add { id, fields } => {
            commands::chapa::add(&open()?, &id, fields.into_values()).await?;
        }

        Commands::Edit { id, fields } => {
            let values = fields.into_values();
            if values.is_empty() {
                anyhow::bail!("Nothing to change. Pass at least one field flag.");
            }
            commands::chapa::edit(&open()?, &id, values).await?;
        }

        Commands::Convert { id } => {
            commands::chapa::convert(&open()?, &id).await?;
        }

        Commands::Delete { id, yes } => {
            if !yes {
                eprint!("Are you sure? [y/N]: ");
                let mut s = String::new();
                std::io::stdin().read_line(&mut s)?;
                if !s.trim().eq_ignore_ascii_case("y") {
                    println!("Cancelled.");
                    return Ok(());
                }
            }
            commands::chapa::delete(&open()?, &id).await?;
        }

        Commands::Get { id } => {
            commands::inventory::get(&open()?, &id).await?;
        }

        Commands::List { what } => match what {
            ListWhat::Chapas => commands::inventory::list_chapas(&open()?).await?,
            ListWhat::Retalhos => commands::inventory::list_retalhos(&open()?).await?,
        },

        Commands::Version => {
            println!("qualicam cli v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
