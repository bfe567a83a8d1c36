//! CLI for inspecting the project route table.
//!
//! Lists, resolves and reverses routes without starting the HTTP server.
//!
//! # Usage
//!
//! ```bash
//! # List all routes
//! cargo run --bin urls -- list
//!
//! # Resolve a path
//! cargo run --bin urls -- resolve /2024/3/15/42-hello-world/
//!
//! # Build a path from a view name and arguments
//! cargo run --bin urls -- reverse entry_detail year=2024 month=3 day=15 pk=42 slug=hello-world
//! ```
//!
//! # Environment Variables
//!
//! - `BLOG_PREFIX` (optional): prefix the blog routes are mounted under,
//!   overridden by `--prefix`

use myblog::config::Config;
use myblog::routing::{PathKwargs, PathValue};
use myblog::urls::root_urlconf;
use myblog::views::AppResolver;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::*;

/// CLI tool for the myblog route table.
#[derive(Parser)]
#[command(name = "urls")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Blog route prefix (defaults to `BLOG_PREFIX`)
    #[arg(short, long, global = true)]
    prefix: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Route table commands.
#[derive(Subcommand)]
enum Commands {
    /// List all routes in resolution order
    List,

    /// Resolve a request path to its route
    Resolve {
        /// Request path, e.g. /2024/3/15/42-hello-world/
        path: String,
    },

    /// Build the path of a named route
    Reverse {
        /// View name, e.g. entry_detail or namespace:name
        view_name: String,

        /// Route arguments as key=value
        args: Vec<String>,
    },
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(prefix) = cli.prefix {
        config.blog_prefix = prefix;
    }
    config.validate()?;

    let resolver = root_urlconf(&config.blog_prefix)
        .compile()
        .context("Failed to compile route table")?;

    match cli.command {
        Commands::List => list_routes(&resolver),
        Commands::Resolve { path } => resolve_path(&resolver, &path)?,
        Commands::Reverse { view_name, args } => reverse_route(&resolver, &view_name, &args)?,
    }

    Ok(())
}

/// Prints every route with its view name.
fn list_routes(resolver: &AppResolver) {
    println!("{}", "Routes".bright_blue().bold());
    println!();

    for info in resolver.routes() {
        let name = match info.view_name {
            Some(name) => name.cyan(),
            None => "(unnamed)".dimmed(),
        };
        println!("  /{}  {}", info.route.bright_white(), name);
    }

    println!();
    println!("Total: {}", resolver.route_count().to_string().bold());
}

/// Prints the route a path resolves to, or the routes tried.
fn resolve_path(resolver: &AppResolver, path: &str) -> Result<()> {
    match resolver.resolve(path) {
        Ok(found) => {
            let resolved = found.resolved;
            println!("{}", "Resolved".green().bold());
            println!("  Route:     /{}", resolved.route.bright_white());
            println!(
                "  View name: {}",
                resolved
                    .view_name()
                    .unwrap_or_else(|| "(unnamed)".to_string())
                    .cyan()
            );
            for (name, value) in &resolved.kwargs {
                println!("  {:<10} {}", format!("{name}:"), value.to_string().bright_yellow());
            }
            Ok(())
        }
        Err(e) => {
            println!("{}", "No match".red().bold());
            for route in &e.tried {
                println!("  tried /{}", route.dimmed());
            }
            bail!("{}", e)
        }
    }
}

/// Prints the path built from a view name and `key=value` arguments.
fn reverse_route(resolver: &AppResolver, view_name: &str, args: &[String]) -> Result<()> {
    let kwargs = parse_kwargs(args)?;
    let path = resolver.reverse(view_name, &kwargs)?;
    println!("{}", path.bright_white());
    Ok(())
}

/// Parses `key=value` pairs. Values are passed as text; each route's
/// converters decide whether they fit.
fn parse_kwargs(args: &[String]) -> Result<PathKwargs> {
    args.iter()
        .map(|arg| {
            let (key, value) = arg
                .split_once('=')
                .with_context(|| format!("Argument '{arg}' must be in key=value form"))?;
            Ok((key.to_string(), PathValue::from(value)))
        })
        .collect()
}
