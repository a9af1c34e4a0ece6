//! Token catalog command.

use std::fs;

use anyhow::{bail, Context as _, Result};
use serde::Serialize;
use upenergy_commerce::catalog::{unique_countries, unique_vintages, Token};
use upenergy_commerce::search::{Filter, TokenQuery};

use super::CatalogArgs;
use crate::context::Context;

/// Run the catalog command.
pub fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let path = ctx.resolve_path(&args.file);
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read token file: {}", path.display()))?;
    let tokens: Vec<Token> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse token file: {}", path.display()))?;

    if let Some(token_id) = &args.add {
        return add_to_cart(token_id, &tokens, ctx);
    }

    let query = build_query(&args);
    let mut hits = query.apply(&tokens);
    let matched = hits.len();
    if let Some(limit) = args.limit {
        hits.truncate(limit);
    }

    let view = CatalogView {
        total: tokens.len(),
        matched,
        sort: query.sort.as_str(),
        tokens: &hits,
        countries: args.facets.then(|| unique_countries(&tokens)),
        vintages: args.facets.then(|| unique_vintages(&tokens)),
    };
    ctx.output.emit(&view, || {
        ctx.output.section(&format!(
            "{} of {} tokens, {}",
            matched,
            tokens.len(),
            query.sort.display_name()
        ));
        if hits.is_empty() {
            ctx.output.info("No tokens match the current filters");
        } else {
            ctx.output.token_table(&hits);
        }

        if let (Some(countries), Some(vintages)) = (&view.countries, &view.vintages) {
            ctx.output.facet("Countries", countries);
            ctx.output.facet("Vintages", vintages);
        }
    });

    Ok(())
}

fn build_query(args: &CatalogArgs) -> TokenQuery {
    let mut query = TokenQuery::new().with_sort(args.sort);
    if let Some(search) = &args.search {
        query = query.with_search(search.clone());
    }
    if let Some(country) = &args.country {
        query = query.with_filter(Filter::country(country.clone()));
    }
    if let Some(status) = args.status {
        query = query.with_filter(Filter::Status(status));
    }
    if let Some(year) = args.vintage {
        query = query.with_filter(Filter::Vintage(year));
    }
    query
}

fn add_to_cart(token_id: &str, tokens: &[Token], ctx: &Context) -> Result<()> {
    let Some(token) = tokens.iter().find(|t| t.token_id.as_str() == token_id) else {
        bail!("Token {} is not in the token file", token_id);
    };

    let mut cart = ctx.open_cart()?;
    cart.add_one(token.to_descriptor());

    ctx.output.emit(&cart.pricing(), || {
        ctx.output.success(&format!(
            "Added {} ({} tonne(s) in cart)",
            token.token_id,
            cart.quantity_of(&token.token_id)
        ));
        ctx.output.amount("Total", cart.total());
    });
    Ok(())
}

/// Catalog listing as printed in JSON mode.
#[derive(Serialize)]
struct CatalogView<'a> {
    total: usize,
    matched: usize,
    sort: &'static str,
    tokens: &'a [&'a Token],
    #[serde(skip_serializing_if = "Option::is_none")]
    countries: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vintages: Option<Vec<i32>>,
}
