//! Articles Demo - End-to-end example
//!
//! Builds an article collection from parallel arrays, prints it, and
//! destroys it:
//!
//! ```text
//! Article "Foo" is published on 2001
//! Article "Bar" is published on 1999
//! ```
//!
//! # Usage
//!
//! ```bash
//! cargo run --package folio-playground --bin articles-demo -- --verbose
//! ```

use clap::Parser;

use common_config::{FolioConfig, LogLevel};
use common_error::FolioResult;
use folio_store::{MemoryManager, RecordStore};

use folio_playground::{SampleArticles, parse_article, sample_articles};

/// Articles Demo CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "articles-demo")]
#[command(about = "Build, print and destroy a Folio article collection")]
struct Args {
    /// Article as TITLE=YEAR; repeat for more. Defaults to Foo=2001 Bar=1999
    #[arg(short, long = "article", value_name = "TITLE=YEAR")]
    articles: Vec<String>,

    /// Memory budget in bytes for the collection
    #[arg(long)]
    memory_limit: Option<usize>,

    /// Verbose output
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> FolioResult<()> {
    let args = Args::parse();

    let mut config = FolioConfig::from_env()?;
    if args.verbose {
        config.logging.level = LogLevel::Debug;
    }
    if args.memory_limit.is_some() {
        config.store.memory_limit = args.memory_limit;
    }

    env_logger::Builder::new()
        .filter_level(config.logging.level.to_filter())
        .parse_env(env_logger::Env::default())
        .init();

    let sample = if args.articles.is_empty() {
        sample_articles()
    } else {
        let mut sample = SampleArticles::default();
        for spec in &args.articles {
            let (title, year) = parse_article(spec)?;
            sample.push(title, year);
        }
        sample
    };

    let store = RecordStore::from_config(&config.store);
    let collection = store.construct(&sample.titles, &sample.years, sample.len() as i64)?;
    log::info!(
        "built {} articles using {} bytes",
        collection.len(),
        collection.memory_usage()
    );

    collection.render_stdout()?;
    collection.destroy();

    let manager = store.manager();
    match manager.limit() {
        Some(_) => log::info!(
            "released; {} bytes still reserved, {} available",
            manager.used(),
            manager.available()
        ),
        None => log::info!("released; {} bytes still reserved", manager.used()),
    }
    Ok(())
}
