//! OpenSearch-RS: search engine management with OpenSearch support
//!
//! This is the command line entry point for the application.

use anyhow::{anyhow, bail, Result};
use opensearch_rs::{
    config::{self, Settings},
    engines::{build_bang_for_name, SearchEngineManager},
    network::{Cancellable, HttpClient},
    opensearch::{load_from_link, AutodiscoveryLink},
};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    run(args).await
}

async fn run(args: Vec<String>) -> Result<()> {
    let mut settings_path: Option<PathBuf> = None;
    let mut save = false;
    let mut list = false;
    let mut discover: Option<(String, Option<String>)> = None;
    let mut query_words: Vec<String> = Vec::new();

    let mut iter = args.into_iter().peekable();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            "-V" | "--version" => {
                println!("opensearch-rs v{}", opensearch_rs::VERSION);
                return Ok(());
            }
            "--settings" => {
                let path = iter
                    .next()
                    .ok_or_else(|| anyhow!("--settings requires a file path"))?;
                settings_path = Some(PathBuf::from(path));
            }
            "--save" => save = true,
            "--list" => list = true,
            "--discover" => {
                let url = iter.next().ok_or_else(|| anyhow!("--discover requires a URL"))?;
                let name = match iter.peek() {
                    Some(next) if !next.starts_with('-') => iter.next(),
                    _ => None,
                };
                discover = Some((url, name));
            }
            other if other.starts_with('-') => {
                bail!("unknown option {:?} (see --help)", other);
            }
            other => query_words.push(other.to_string()),
        }
    }
    if save && discover.is_none() {
        bail!("--save only makes sense together with --discover");
    }

    // Load configuration
    let path = settings_path.unwrap_or_else(config::settings_file);
    let mut settings = if path.exists() {
        info!("Loading settings from: {}", path.display());
        Settings::from_file(&path)?
    } else {
        info!("No settings file found, using defaults");
        Settings::default()
    };
    settings.merge_env();

    let mut manager = SearchEngineManager::from_settings(&settings);

    if list {
        print_engines(&manager);
        return Ok(());
    }

    if let Some((url, name)) = discover {
        let client = HttpClient::new(opensearch_rs::DEFAULT_TIMEOUT)?;
        let link = AutodiscoveryLink::new(name.unwrap_or_else(|| url.clone()), url);
        let mut engine = load_from_link(&client, &link, &Cancellable::new()).await?;

        // Derive a shortcut from the name, but never steal an existing one.
        let bang = build_bang_for_name(engine.name());
        if !bang.is_empty() && !manager.has_bang(&bang) {
            engine.set_bang(&bang);
        }

        println!("Name:        {}", engine.name());
        println!("Address:     {}", engine.url());
        if let Some(suggestions) = engine.suggestions_url() {
            println!("Suggestions: {}", suggestions);
        }
        if !engine.bang().is_empty() {
            println!("Shortcut:    {}", engine.bang());
        }

        if save {
            manager.add_engine(engine);
            manager.save_to_settings(&mut settings);
            settings.to_file(&path)?;
            info!("Saved {} search engines to {}", manager.len(), path.display());
        }
        return Ok(());
    }

    if !query_words.is_empty() {
        let query = query_words.join(" ");
        let address = manager
            .parse_bang_search(&query)
            .unwrap_or_else(|| manager.default_engine().build_search_address(&query));
        println!("{}", address);
        return Ok(());
    }

    print_usage();
    Ok(())
}

/// Print the configured engines, marking the default
fn print_engines(manager: &SearchEngineManager) {
    println!(
        "{} search engines, default is {}",
        manager.len(),
        manager.default_engine().name()
    );
    for (position, engine) in manager.engines().enumerate() {
        let marker = if position == manager.default_position() {
            "*"
        } else {
            " "
        };
        println!(
            " {} {:<24} {:<8} {}",
            marker,
            engine.name(),
            engine.bang(),
            engine.url()
        );
    }
}

/// Print usage information
fn print_usage() {
    println!(
        r#"
OpenSearch-RS v{}
Search engine management with OpenSearch description support

USAGE:
    opensearch-rs [OPTIONS] [QUERY...]

    A plain query is resolved through bang parsing ("!w rust borrow") with
    fallback to the default engine; the search address is printed.

OPTIONS:
    --list                   List the configured search engines
    --discover <URL> [NAME]  Download and parse an OpenSearch description
    --save                   With --discover: add the engine to the settings
    --settings <FILE>        Path to the settings file
    -h, --help               Print help information
    -V, --version            Print version information

ENVIRONMENT VARIABLES:
    OPENSEARCH_RS_SETTINGS        Path to search-engines.yml
    OPENSEARCH_RS_DEFAULT_ENGINE  Name of the default engine

For more information, visit: https://github.com/opensearch-rs/opensearch-rs
"#,
        opensearch_rs::VERSION
    );
}
