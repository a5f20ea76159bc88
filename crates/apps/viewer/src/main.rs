mod config;
mod report;

use std::error::Error;
use std::path::PathBuf;

use catalog::{HttpMapService, InMemoryMapService, MapRecord, MapService, PinInput};
use clap::{Parser, Subcommand};
use foundation::ids::PinIndex;
use session::coordinator::MapSessionCoordinator;
use session::loader::{NoSdk, SdkGate};
use session::view::try_load_view;
use surface::headless::MercatorSurface;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{PopupVariant, ViewerConfig};
use crate::report::LayoutReport;

#[derive(Parser, Debug)]
#[command(author, version, about = "Lay out shared pin maps without a browser")]
struct Args {
    /// Map backend base URL (overrides PINMAP_API_BASE)
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Viewport width in pixels
    #[arg(long, global = true)]
    width: Option<f64>,

    /// Viewport height in pixels
    #[arg(long, global = true)]
    height: Option<f64>,

    /// Popup geometry preset
    #[arg(long, value_enum, global = true)]
    variant: Option<PopupVariant>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lay out a map record read from a JSON file
    Plan {
        file: PathBuf,

        /// Pin labels whose popups to open, in order (e.g. A,C)
        #[arg(long, value_delimiter = ',')]
        open: Vec<String>,
    },

    /// Fetch a shared map from the backend and lay it out
    Fetch {
        map_id: String,

        /// Pin labels whose popups to open, in order (e.g. A,C)
        #[arg(long, value_delimiter = ',')]
        open: Vec<String>,
    },

    /// Create a map and print its share URL
    Create {
        #[arg(long)]
        title: String,

        /// name|address|note (name and note may be empty)
        #[arg(long = "pin", required = true)]
        pins: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = ViewerConfig::from_env().with_overrides(
        args.api_base,
        args.width,
        args.height,
        args.variant,
    );

    match args.command {
        Command::Plan { file, open } => {
            let raw = tokio::fs::read_to_string(&file).await?;
            let record: MapRecord = serde_json::from_str(&raw)?;
            let map_id = record.map_id.clone();
            let service = InMemoryMapService::new(config.api_base.as_str());
            service.insert(record);
            show(&config, &service, &map_id, &open).await
        }
        Command::Fetch { map_id, open } => {
            let service = HttpMapService::new(config.api_base.as_str());
            show(&config, &service, &map_id, &open).await
        }
        Command::Create { title, pins } => {
            let pins = pins
                .iter()
                .map(|raw| parse_pin(raw))
                .collect::<Result<Vec<_>, _>>()?;
            let request = catalog::prepare_request(&title, pins)?;
            let service = HttpMapService::new(config.api_base.as_str());
            let created = service.create_map(&request).await?;
            info!(map_id = %created.map_id, "map created");
            println!("{}", created.share_url);
            Ok(())
        }
    }
}

async fn show<M: MapService>(
    config: &ViewerConfig,
    service: &M,
    map_id: &str,
    open: &[String],
) -> Result<(), Box<dyn Error>> {
    let mut coordinator = MapSessionCoordinator::new(
        MercatorSurface::new(config.viewport),
        config.session_config(),
    );
    let gate = SdkGate::new();
    let plan = try_load_view(&gate, &NoSdk, service, map_id, &mut coordinator).await?;
    coordinator.pump();

    for label in open {
        let index =
            PinIndex::from_label(label).ok_or_else(|| format!("invalid pin label '{label}'"))?;
        let marker = coordinator
            .marker_for_pin(index)
            .ok_or_else(|| format!("no pin labelled '{}'", index.label()))?;
        coordinator.surface_mut().click_marker(marker);
        coordinator.pump();
    }

    let report = LayoutReport::build(&coordinator, plan);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn parse_pin(raw: &str) -> Result<PinInput, String> {
    let mut parts = raw.splitn(3, '|');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(name), Some(address), note) => Ok(PinInput {
            name: name.to_string(),
            address: address.to_string(),
            note: note.unwrap_or_default().to_string(),
        }),
        _ => Err(format!("expected name|address[|note], got '{raw}'")),
    }
}
