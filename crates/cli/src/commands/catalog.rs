//! Catalog browsing commands.

use clap::Subcommand;

use kiosk_core::ProductId;
use kiosk_storefront::AppState;
use kiosk_storefront::catalog::{CatalogError, Product};

#[derive(Subcommand)]
pub enum ProductsAction {
    /// List products, optionally filtered by category
    List {
        /// Only show products in this category
        #[arg(short, long)]
        category: Option<String>,

        /// Show at most this many products
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Show one product in full
    Show {
        /// Product ID
        id: i64,
    },
}

/// Run a `products` subcommand.
pub async fn products(state: &AppState, action: ProductsAction) -> Result<(), CatalogError> {
    match action {
        ProductsAction::List { category, limit } => {
            let products = match (category, limit) {
                (Some(category), _) => state.catalog().list_by_category(&category).await,
                (None, Some(limit)) => state.catalog().list_products_limited(limit).await,
                (None, None) => state.catalog().list_products().await,
            };
            // Fetch failures read as an empty shelf, not a crash.
            print_product_lines(&products.unwrap_or_default());
        }
        ProductsAction::Show { id } => {
            let product = state.catalog().get_product(ProductId::new(id)).await?;
            print_product(&product);
        }
    }
    Ok(())
}

/// Run the `categories` command.
pub async fn categories(state: &AppState) -> Result<(), CatalogError> {
    for category in state.catalog().list_categories().await.unwrap_or_default() {
        println!("{category}");
    }
    Ok(())
}

/// Run the `search` command.
pub async fn search(state: &AppState, query: &str) -> Result<(), CatalogError> {
    let results = state.catalog().search(query).await.unwrap_or_default();
    if results.is_empty() {
        println!("no products matched '{query}'");
    } else {
        print_product_lines(&results);
    }
    Ok(())
}

fn print_product_lines(products: &[Product]) {
    for product in products {
        let price = product.price.to_string();
        println!(
            "{:>4}  {price:>9}  {}  [{}]",
            product.id, product.title, product.category
        );
    }
}

fn print_product(product: &Product) {
    println!("{} ({})", product.title, product.id);
    println!("  price:    {}", product.price);
    println!("  category: {}", product.category);
    println!(
        "  rating:   {} ({} reviews)",
        product.rating.rate, product.rating.count
    );
    println!("  image:    {}", product.image);
    println!();
    println!("{}", product.description);
}
