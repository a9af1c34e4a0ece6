//! UpEnergy CLI - carbon-credit marketplace client.
//!
//! Commands:
//! - `upenergy cart` - Add, remove and price cart items
//! - `upenergy catalog` - Filter and sort a token file, add tokens to the cart
//! - `upenergy login` / `logout` / `whoami` - Demo login
//! - `upenergy config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{CartArgs, CatalogArgs, ConfigArgs, LoginArgs};
use config::{LogConfig, LogFormat};

/// UpEnergy CLI - Browse carbon-credit tokens and manage your cart
#[derive(Parser)]
#[command(name = "upenergy")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Keep a separate cart and login under this profile name
    #[arg(short, long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the cart
    Cart(CartArgs),

    /// Browse a token file
    Catalog(CatalogArgs),

    /// Log in (any name and email are accepted)
    Login(LoginArgs),

    /// Log out
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, cli.profile, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    init_tracing(&ctx.config.log, cli.verbose);

    // Execute command
    let result = match cli.command {
        Commands::Cart(args) => commands::cart::run(args, &ctx),
        Commands::Catalog(args) => commands::catalog::run(args, &ctx),
        Commands::Login(args) => commands::auth::login(args, &ctx),
        Commands::Logout => commands::auth::logout(&ctx),
        Commands::Whoami => commands::auth::whoami(&ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

fn init_tracing(log: &LogConfig, verbose: bool) {
    let filter = EnvFilter::try_from_env("UPENERGY_LOG").unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("upenergy=debug,info")
        } else {
            EnvFilter::new(&log.filter)
        }
    });

    let registry = tracing_subscriber::registry().with(filter);

    match log.format {
        LogFormat::Json => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Compact => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use commands::CartCommand;
    use rust_decimal::Decimal;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn all_subcommands_parse() {
        let subcommands = [
            vec!["upenergy", "cart"],
            vec!["upenergy", "cart", "show"],
            vec!["upenergy", "cart", "add", "0.0.1", "-q", "2", "--price", "12.5"],
            vec!["upenergy", "cart", "remove", "0.0.1"],
            vec!["upenergy", "cart", "set", "0.0.1", "-3"],
            vec!["upenergy", "cart", "clear", "--yes"],
            vec!["upenergy", "catalog", "tokens.json", "-s", "gulu", "--sort", "rating"],
            vec!["upenergy", "login", "-n", "Ada", "-e", "ada@example.com", "-r", "admin"],
            vec!["upenergy", "logout"],
            vec!["upenergy", "whoami"],
            vec!["upenergy", "config", "init", "--force"],
        ];
        for args in &subcommands {
            let result = Cli::try_parse_from(args.iter());
            assert!(
                result.is_ok(),
                "Failed to parse: {:?} error: {:?}",
                args,
                result.err()
            );
        }
    }

    #[test]
    fn cart_add_takes_price_and_profile() {
        let cli = Cli::parse_from([
            "upenergy", "-p", "alice", "cart", "add", "T1", "--price", "12.5",
        ]);
        assert_eq!(cli.profile.as_deref(), Some("alice"));

        let Commands::Cart(cart) = cli.command else {
            panic!("expected cart command");
        };
        let Some(CartCommand::Add(add)) = cart.command else {
            panic!("expected cart add");
        };
        assert_eq!(add.token_id, "T1");
        assert_eq!(add.quantity, 1);
        assert_eq!(add.price, Some(Decimal::new(125, 1)));
    }

    #[test]
    fn global_profile_short_flag_after_subcommand() {
        let cli = Cli::parse_from(["upenergy", "cart", "add", "T1", "-p", "bob"]);
        assert_eq!(cli.profile.as_deref(), Some("bob"));
    }
}
