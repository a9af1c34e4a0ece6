//! Terminal rendering of carts, token listings and status lines.
//!
//! In `--json` mode every command emits exactly one JSON document on stdout;
//! human text is suppressed and errors go to stderr as `{"error": ...}`.

use std::fmt::Display;

use console::{style, StyledObject};
use serde::Serialize;
use upenergy_commerce::cart::CartLineItem;
use upenergy_commerce::catalog::Token;
use upenergy_commerce::money::Money;

const CART_COLUMNS: [(&str, usize); 6] = [
    ("TOKEN", 14),
    ("NAME", 28),
    ("TYPE", 8),
    ("PRICE", 10),
    ("TONNES", 10),
    ("TOTAL", 10),
];

const TOKEN_COLUMNS: [(&str, usize); 6] = [
    ("TOKEN", 14),
    ("SERIAL", 14),
    ("LOCATION", 22),
    ("DISTRIBUTED", 12),
    ("STATUS", 10),
    ("RATING", 10),
];

#[derive(Clone, Copy)]
enum Tone {
    Info,
    Success,
    Warn,
}

/// Output handler shared by every command.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Print `value` as JSON in JSON mode, otherwise run `human`.
    pub fn emit<T: Serialize>(&self, value: &T, human: impl FnOnce()) {
        if self.json {
            if let Ok(json) = serde_json::to_string_pretty(value) {
                println!("{}", json);
            }
        } else {
            human();
        }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        self.status(Tone::Info, msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        self.status(Tone::Success, msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        self.status(Tone::Warn, msg);
    }

    /// Print an error; the only message that survives JSON mode.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        } else {
            eprintln!("{} {}", style("✗").red(), style(msg).red());
        }
    }

    fn status(&self, tone: Tone, msg: &str) {
        if self.json {
            return;
        }
        match tone {
            Tone::Info => println!("{} {}", style("ℹ").blue(), msg),
            Tone::Success => println!("{} {}", style("✓").green(), msg),
            Tone::Warn => eprintln!("{} {}", style("⚠").yellow(), msg),
        }
    }

    /// Print a section title.
    pub fn section(&self, title: &str) {
        if !self.json {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    /// Print a labelled value.
    pub fn field(&self, label: &str, value: impl Display) {
        if !self.json {
            println!("  {}: {}", style(label).dim(), value);
        }
    }

    /// Print a labelled amount, right-aligned with the other amounts.
    pub fn amount(&self, label: &str, money: Money) {
        if !self.json {
            println!("  {:<24}{:>14}", style(label).dim(), money.display());
        }
    }

    /// Print one facet: a title and its distinct values.
    pub fn facet<T: Display>(&self, title: &str, values: impl IntoIterator<Item = T>) {
        if self.json {
            return;
        }
        self.section(title);
        for value in values {
            println!("  {} {}", style("•").dim(), value);
        }
    }

    /// Print cart line items as a table, plus provenance in verbose mode.
    pub fn cart_table(&self, items: &[CartLineItem]) {
        if self.json {
            return;
        }
        print_row(CART_COLUMNS.map(|(title, _)| title.to_string()), &CART_COLUMNS);
        for item in items {
            print_row(
                [
                    item.token_id.to_string(),
                    item.name.clone(),
                    credit_badge(item.is_forward_credit).to_string(),
                    item.unit_price.display(),
                    item.quantity.to_string(),
                    item.line_total().display(),
                ],
                &CART_COLUMNS,
            );
        }

        if self.verbose {
            self.section("Details");
            for item in items {
                println!(
                    "  {} {}: vintage {}, {}, {} / {}, {} tonnes available",
                    style("•").dim(),
                    item.token_id,
                    item.vintage,
                    item.location,
                    item.methodology,
                    item.registry,
                    item.available_units
                );
            }
        }
    }

    /// Print tokens as a table.
    pub fn token_table(&self, tokens: &[&Token]) {
        if self.json {
            return;
        }
        print_row(TOKEN_COLUMNS.map(|(title, _)| title.to_string()), &TOKEN_COLUMNS);
        for token in tokens {
            let location = match &token.village {
                Some(village) => format!("{}, {}", village, token.country),
                None => token.country.clone(),
            };
            print_row(
                [
                    token.token_id.to_string(),
                    token.serial.clone(),
                    location,
                    token
                        .distributed_at()
                        .map_or_else(|| "-".to_string(), |d| d.date().to_string()),
                    token_status_badge(token).to_string(),
                    token
                        .rating
                        .map_or_else(|| "-".to_string(), |r| format!("{:.1}", r)),
                ],
                &TOKEN_COLUMNS,
            );
        }
    }
}

fn print_row<const N: usize>(cells: [String; N], columns: &[(&str, usize); N]) {
    let formatted: Vec<String> = cells
        .iter()
        .zip(columns)
        .map(|(cell, &(_, width))| format!("{:width$}", cell, width = width))
        .collect();
    println!("  {}", formatted.join("  "));
}

fn credit_badge(is_forward_credit: bool) -> StyledObject<&'static str> {
    if is_forward_credit {
        style("FCT").yellow()
    } else {
        style("Verified").green()
    }
}

fn token_status_badge(token: &Token) -> StyledObject<&'static str> {
    if token.for_sale {
        style("for sale").green()
    } else if token.is_owned() {
        style("owned").dim()
    } else {
        style("available").cyan()
    }
}
