//! Cart commands.

use anyhow::Result;
use dialoguer::Confirm;
use rust_decimal::Decimal;
use serde::Serialize;
use upenergy_cache::FileStore;
use upenergy_commerce::cart::{
    CartLineItem, CartPricing, CartStore, TokenDescriptor, PLATFORM_FEE_RATE,
};
use upenergy_commerce::ids::TokenId;
use upenergy_commerce::money::Money;

use super::{AddArgs, CartArgs, CartCommand};
use crate::context::Context;

/// Run the cart command.
pub fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;

    match args.command {
        Some(CartCommand::Add(add)) => add_item(add, &mut cart, ctx),
        Some(CartCommand::Remove { token_id }) => remove_item(&token_id, &mut cart, ctx),
        Some(CartCommand::Set { token_id, quantity }) => {
            set_quantity(&token_id, quantity, &mut cart, ctx)
        }
        Some(CartCommand::Clear { yes }) => clear(yes, &mut cart, ctx),
        Some(CartCommand::Show) | None => show(&cart, ctx),
    }
}

impl AddArgs {
    fn into_descriptor(self) -> TokenDescriptor {
        let mut token = TokenDescriptor::new(self.token_id);
        token.unit_price = self.price.map(Money::new);
        token.name = self.name;
        token.project_type = self.project_type;
        token.is_forward_credit = Some(!self.verified);
        token.vintage = self.vintage;
        token.location = self.location;
        token.methodology = self.methodology;
        token.registry = self.registry;
        token.available_units = self.available;
        token
    }
}

fn add_item(args: AddArgs, cart: &mut CartStore<FileStore>, ctx: &Context) -> Result<()> {
    let quantity = args.quantity;
    let token = args.into_descriptor();
    let token_id = token.token_id.clone();

    if quantity == 0 {
        ctx.output.warn("Quantity is 0; nothing added");
    }
    cart.add(token, quantity);

    ctx.output.success(&format!(
        "{} now has {} tonne(s) in the cart",
        token_id,
        cart.quantity_of(&token_id)
    ));
    print_summary(cart, ctx);
    Ok(())
}

fn remove_item(token_id: &str, cart: &mut CartStore<FileStore>, ctx: &Context) -> Result<()> {
    let token_id = TokenId::new(token_id);
    if !cart.contains(&token_id) {
        ctx.output.warn(&format!("{} is not in the cart", token_id));
        report(cart, ctx, || {});
        return Ok(());
    }

    cart.remove(&token_id);
    ctx.output.success(&format!("Removed {}", token_id));
    print_summary(cart, ctx);
    Ok(())
}

fn set_quantity(
    token_id: &str,
    quantity: i64,
    cart: &mut CartStore<FileStore>,
    ctx: &Context,
) -> Result<()> {
    let token_id = TokenId::new(token_id);
    if !cart.contains(&token_id) {
        ctx.output.warn(&format!(
            "{} is not in the cart; use `upenergy cart add` first",
            token_id
        ));
        report(cart, ctx, || {});
        return Ok(());
    }

    cart.set_quantity(&token_id, quantity);
    if cart.contains(&token_id) {
        ctx.output
            .success(&format!("Set {} to {} tonne(s)", token_id, cart.quantity_of(&token_id)));
    } else {
        ctx.output.success(&format!("Removed {}", token_id));
    }
    print_summary(cart, ctx);
    Ok(())
}

fn clear(yes: bool, cart: &mut CartStore<FileStore>, ctx: &Context) -> Result<()> {
    if cart.state().is_empty() {
        ctx.output.info("Cart is already empty");
        report(cart, ctx, || {});
        return Ok(());
    }

    if !yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove all {} item(s) from the cart?", cart.items().len()))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Cart left unchanged");
            return Ok(());
        }
    }

    cart.clear();
    ctx.output.success("Cart cleared");
    report(cart, ctx, || {});
    Ok(())
}

/// Cart as printed in JSON mode.
#[derive(Serialize)]
struct CartView<'a> {
    items: &'a [CartLineItem],
    pricing: CartPricing,
}

fn show(cart: &CartStore<FileStore>, ctx: &Context) -> Result<()> {
    report(cart, ctx, || {
        ctx.output.section("Cart");
        if cart.state().is_empty() {
            ctx.output.info("Your cart is empty");
            return;
        }
        ctx.output.cart_table(cart.items());
        print_totals(cart, ctx);
    });
    Ok(())
}

/// Print the cart in JSON mode, otherwise run `human`.
fn report(cart: &CartStore<FileStore>, ctx: &Context, human: impl FnOnce()) {
    let view = CartView {
        items: cart.items(),
        pricing: cart.pricing(),
    };
    ctx.output.emit(&view, human);
}

fn print_summary(cart: &CartStore<FileStore>, ctx: &Context) {
    report(cart, ctx, || print_totals(cart, ctx));
}

fn print_totals(cart: &CartStore<FileStore>, ctx: &Context) {
    let pricing = cart.pricing();
    ctx.output.info("");
    ctx.output.field("Items", pricing.item_count);
    ctx.output
        .field("Forward credits", cart.forward_credit_items().len());
    ctx.output.field("Verified credits", cart.verified_items().len());
    ctx.output.amount("Subtotal", pricing.subtotal);
    ctx.output.amount(
        &format!(
            "Platform fee ({}%)",
            (PLATFORM_FEE_RATE * Decimal::ONE_HUNDRED).normalize()
        ),
        pricing.fees,
    );
    ctx.output.amount("Total", pricing.total);
}
