//! Example: Walk the TuneIn root categories
//!
//! This example demonstrates:
//! - Loading an optional YAML configuration
//! - Browsing every root category
//! - Using the parsed `URLObj` of each item
//! - Resolving the streams of a station
//!
//! Run with: cargo run -p pmotunein --example browse_categories [config.yaml]

use pmotunein::{Category, TuneInClient, TuneInConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => TuneInConfig::from_yaml_file(path)?,
        None => TuneInConfig::default(),
    };
    let client = TuneInClient::from_config(config)?;

    println!("TuneIn - Root Categories");
    println!("========================\n");

    for category in Category::ALL {
        match client.browse_category(category, None).await {
            Ok(results) => {
                println!(
                    "{} ({} items)",
                    results.head.title.as_deref().unwrap_or(category.as_str()),
                    results.body.len()
                );
                for item in results.body.iter().take(5) {
                    let target = item
                        .url_obj
                        .as_ref()
                        .and_then(|obj| obj.query_param("id").or(obj.query_param("c")))
                        .unwrap_or("-");
                    println!("  - {} [{}]", item.text.as_deref().unwrap_or("?"), target);
                }
            }
            Err(e) if e.is_remote_fault() => {
                println!("{}: TuneIn fault: {}", category, e.fault().unwrap_or("?"));
            }
            Err(e) => return Err(e.into()),
        }
    }

    println!("\nStreams for s67868:");
    for stream in client.tune_stream_urls("s67868").await? {
        println!("  - {}", stream.href);
    }

    Ok(())
}
