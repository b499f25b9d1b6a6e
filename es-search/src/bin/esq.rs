use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use es_search::es_dsl::{Predicates, Query};
use es_search::{Config, Searcher, SortOrder};
use serde_json::Value;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "esq", version)]
#[command(about = "Query a document-search index from the command line", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "esq.toml")]
    config: PathBuf,

    /// Log request bodies and failures
    #[arg(short, long, default_value = "false")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the index
    Search {
        /// Required exact match, as field=value
        #[arg(long = "where", value_name = "FIELD=VALUE")]
        where_: Vec<String>,

        /// Optional exact match, as field=value
        #[arg(long, value_name = "FIELD=VALUE")]
        or_where: Vec<String>,

        /// Required full-text match, as field=value
        #[arg(long = "match", value_name = "FIELD=VALUE")]
        match_: Vec<String>,

        /// Sort entry, as field[:asc|desc]
        #[arg(long, value_name = "FIELD[:ORDER]")]
        sort: Vec<String>,

        /// Hits per page
        #[arg(long)]
        size: Option<u64>,

        /// Zero-based page number
        #[arg(long)]
        page: Option<u64>,
    },
    /// Fetch one document by id
    Get { id: String },
    /// Delete one document by id
    Delete { id: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let config = Config::load(&cli.config)?;
    let mut searcher = Searcher::from_config(&config).context("Failed to set up searcher")?;
    if cli.verbose {
        searcher.set_logging(true);
    }

    let output = match cli.command {
        Commands::Search {
            where_,
            or_where,
            match_,
            sort,
            size,
            page,
        } => {
            let mut query = Query::new();
            for pair in &where_ {
                let (field, value) = parse_pair(pair)?;
                query.where_(field, value);
            }
            for pair in &or_where {
                let (field, value) = parse_pair(pair)?;
                query.or_where(field, value);
            }
            for pair in &match_ {
                let (field, value) = parse_pair(pair)?;
                query.match_(field, value);
            }
            searcher.set_query(&query);

            for entry in &sort {
                let (field, order) = parse_sort(entry)?;
                searcher.order_by(field, order);
            }
            if let Some(size) = size {
                searcher.take(size);
            }
            if let Some(page) = page {
                searcher.page(page);
            }

            let Some(results) = searcher.get() else {
                bail!("Search on index {} returned no result", searcher.index());
            };
            serde_json::to_value(&results).context("Failed to serialize results")?
        }
        Commands::Get { id } => match searcher.get_by_id(&id) {
            Some(document) => document,
            None => bail!("Document {} not found in index {}", id, searcher.index()),
        },
        Commands::Delete { id } => match searcher.delete_by_id(&id) {
            Some(result) => result,
            None => bail!("Failed to delete document {} from index {}", id, searcher.index()),
        },
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Splits `field=value`; the value is read as JSON when possible, as text otherwise
fn parse_pair(pair: &str) -> Result<(&str, Value)> {
    let Some((field, value)) = pair.split_once('=') else {
        bail!("Expected FIELD=VALUE, got '{}'", pair);
    };
    let field = field.trim();
    if field.is_empty() {
        bail!("Missing field name in '{}'", pair);
    }
    let value = serde_json::from_str(value).unwrap_or(Value::String(value.to_string()));
    Ok((field, value))
}

fn parse_sort(entry: &str) -> Result<(&str, SortOrder)> {
    match entry.split_once(':') {
        Some((field, order)) => Ok((field.trim(), order.parse()?)),
        None => Ok((entry.trim(), SortOrder::Asc)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_pair() {
        assert_eq!(parse_pair("age=30").unwrap(), ("age", json!(30)));
        assert_eq!(parse_pair("login=bob").unwrap(), ("login", json!("bob")));
        assert_eq!(parse_pair("active=true").unwrap(), ("active", json!(true)));
        assert!(parse_pair("login").is_err());
        assert!(parse_pair("=bob").is_err());
    }

    #[test]
    fn test_parse_sort() {
        assert_eq!(parse_sort("name").unwrap(), ("name", SortOrder::Asc));
        assert_eq!(parse_sort("age:desc").unwrap(), ("age", SortOrder::Desc));
        assert!(parse_sort("age:up").is_err());
    }
}
