//! Cart commands.

use clap::Subcommand;

use kiosk_core::ProductId;
use kiosk_storefront::AppState;
use kiosk_storefront::catalog::CatalogError;
use kiosk_storefront::models::ProductSnapshot;

#[derive(Subcommand)]
pub enum CartAction {
    /// Show the active cart
    Show,
    /// Add a product to the cart (fetches its snapshot from the catalog)
    Add {
        /// Product ID
        id: i64,

        /// How many to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a product from the cart
    Remove {
        /// Product ID
        id: i64,
    },
    /// Set the quantity of a product already in the cart (0 removes it)
    Set {
        /// Product ID
        id: i64,
        /// New quantity
        quantity: u32,
    },
    /// Empty the cart
    Clear,
}

/// Run a `cart` subcommand.
pub async fn run(state: &mut AppState, action: CartAction) -> Result<(), CatalogError> {
    match action {
        CartAction::Show => show(state),
        CartAction::Add { id, quantity } => {
            let product = state.catalog().get_product(ProductId::new(id)).await?;
            state
                .cart_mut()
                .add_item(ProductSnapshot::from(&product), quantity);
            println!("added {quantity} x {}", product.title);
            show(state);
        }
        CartAction::Remove { id } => {
            state.cart_mut().remove_item(ProductId::new(id));
            show(state);
        }
        CartAction::Set { id, quantity } => {
            state.cart_mut().set_quantity(ProductId::new(id), quantity);
            show(state);
        }
        CartAction::Clear => {
            state.cart_mut().clear();
            println!("cart cleared");
        }
    }
    Ok(())
}

fn show(state: &AppState) {
    let cart = state.cart();
    if cart.is_empty() {
        println!("cart ({}) is empty", cart.owner());
        return;
    }

    println!("cart ({}):", cart.owner());
    for item in cart.items() {
        let line_total = item.line_total().to_string();
        println!(
            "{:>4}  x{:<3} {line_total:>9}  {}",
            item.product.id, item.quantity, item.product.title
        );
    }
    println!("  {} items, total {}", cart.item_count(), cart.total());
}
