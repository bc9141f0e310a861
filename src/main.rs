/// Version injected at compile time via TSWAPI_VERSION env var (set by CI/CD),
/// or "dev" for local builds.
pub const VERSION: &str = match option_env!("TSWAPI_VERSION") {
    Some(v) => v,
    None => "dev",
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tswapi::config::Config;
use tswapi::render;
use tswapi::resource::{self, apply_filters, FilterState, ResourceType, SwapiResource};
use tswapi::swapi::{Provenance, SwapiClient};

/// Terminal browser for Star Wars reference data
#[derive(Parser, Debug)]
#[command(name = "tswapi", version, about, long_about = None)]
struct Args {
    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    /// Skip the network and serve example data
    #[arg(long, global = true)]
    offline: bool,

    /// Print raw JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List one page (or all pages) of a resource type
    List {
        /// Resource type (defaults to the last one listed)
        resource: Option<ResourceType>,

        #[arg(short, long, default_value_t = 1)]
        page: u32,

        #[arg(short, long)]
        search: Option<String>,

        /// Walk every page
        #[arg(long)]
        all: bool,

        /// Client-side filter, e.g. --filter gender=female
        #[arg(short, long = "filter", value_parser = parse_filter)]
        filters: Vec<(String, String)>,
    },
    /// Show a single record
    Get { resource: ResourceType, id: String },
    /// Follow a relationship URL stored in a record
    Related { url: String },
    /// Search every resource type at once
    Search { query: String },
    /// Show the filters available for a resource type
    Filters { resource: ResourceType },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected key=value, got {:?}", raw)),
    }
}

fn setup_logging(level: LogLevel) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {:?}", log_path))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("tswapi {} started with log level: {:?}", VERSION, level);
    tracing::info!("Log file: {:?}", log_path);

    Ok(Some(guard))
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("tswapi").join("tswapi.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".tswapi").join("tswapi.log");
    }
    PathBuf::from("tswapi.log")
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level)?;

    let mut config = Config::load();
    let endpoints = if args.offline {
        Vec::new()
    } else {
        config.effective_endpoints()
    };
    let client = SwapiClient::with_endpoints(endpoints, config.effective_timeout())
        .context("Failed to create HTTP client")?;

    match args.command {
        Command::List {
            resource,
            page,
            search,
            all,
            filters,
        } => {
            let resource_type = config.effective_resource(resource);
            if let Err(e) = config.set_last_resource(resource_type) {
                tracing::warn!("Failed to save config: {}", e);
            }

            let mut state = FilterState::default();
            state.set_active_resource_type(resource_type);
            state.set_search_query(search.as_deref().unwrap_or_default());
            for (key, value) in &filters {
                state.set_resource_filter(resource_type, key, Some(value.as_str()));
            }

            list(&client, &state, page, all, args.json).await?;
        }
        Command::Get { resource, id } => match resource {
            ResourceType::People => show::<resource::Person>(&client, &id, args.json).await?,
            ResourceType::Planets => show::<resource::Planet>(&client, &id, args.json).await?,
            ResourceType::Species => show::<resource::Species>(&client, &id, args.json).await?,
            ResourceType::Starships => show::<resource::Starship>(&client, &id, args.json).await?,
            ResourceType::Vehicles => show::<resource::Vehicle>(&client, &id, args.json).await?,
            ResourceType::Films => show::<resource::Film>(&client, &id, args.json).await?,
        },
        Command::Related { url } => {
            match resource::fetch_related::<Value>(&client, &url).await {
                Some(fetched) => {
                    println!("{}", serde_json::to_string_pretty(&fetched.data)?);
                    print_note(&fetched.provenance);
                }
                None => println!("No detail view for {:?}", url),
            }
        }
        Command::Search { query } => {
            let search = resource::global_search(&client, &query).await;
            if args.json {
                let sections: serde_json::Map<String, Value> = search
                    .sections
                    .iter()
                    .map(|(rt, fetched)| {
                        serde_json::to_value(&fetched.data).map(|page| (rt.to_string(), page))
                    })
                    .collect::<Result<_, serde_json::Error>>()?;
                println!("{}", serde_json::to_string_pretty(&sections)?);
            } else {
                print!("{}", render::format_search(&search));
            }
            if search.sections.iter().any(|(_, fetched)| fetched.is_mock()) {
                print_note(&Provenance::Mock);
            }
        }
        Command::Filters { resource } => {
            print!("{}", render::format_filter_catalog(resource));
        }
    }

    Ok(())
}

async fn list(client: &SwapiClient, state: &FilterState, page: u32, all: bool, json: bool) -> Result<()> {
    let resource_type = state.active_resource_type;
    let search = Some(state.search_query.as_str()).filter(|s| !s.is_empty());

    let (records, total, served_mock) = if all {
        let pager = resource::fetch_all::<Value>(client, resource_type, search).await;
        let (total, served_mock) = (pager.count(), pager.served_mock());
        (pager.into_items(), total, served_mock)
    } else {
        let fetched = resource::fetch_page::<Value>(client, resource_type, page, search).await;
        let served_mock = fetched.is_mock();
        (fetched.data.results, fetched.data.count, served_mock)
    };

    let visible = apply_filters(&records, state.filters_for(resource_type));

    if json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
    } else {
        print!("{}", render::format_list(resource_type, &visible, total));
    }

    if served_mock {
        print_note(&Provenance::Mock);
    }

    Ok(())
}

async fn show<T: SwapiResource>(client: &SwapiClient, id: &str, json: bool) -> Result<()> {
    let Some(fetched) = resource::fetch_one::<T>(client, T::RESOURCE_TYPE, id).await else {
        println!("No {} with id {:?}", T::RESOURCE_TYPE, id);
        return Ok(());
    };

    if fetched.data.url().is_empty() {
        println!("No {} with id {:?}", T::RESOURCE_TYPE, id);
    } else if json {
        println!("{}", serde_json::to_string_pretty(&fetched.data)?);
    } else {
        print!("{}", render::format_resource(&fetched.data));
    }

    print_note(&fetched.provenance);
    Ok(())
}

fn print_note(provenance: &Provenance) {
    if let Some(note) = render::provenance_note(provenance) {
        eprintln!("{}", note);
    }
}
