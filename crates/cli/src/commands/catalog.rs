//! Catalog browsing commands.

use std::fmt::Write as _;

use storefront_cart::catalog::ProductFilter;
use storefront_cart::{CartConfig, CatalogClient, CatalogError};
use storefront_cart_core::{Category, Product};

/// List catalog products matching `filter`.
#[allow(clippy::print_stdout)]
pub async fn products(config: &CartConfig, filter: &ProductFilter) -> Result<(), CatalogError> {
    let catalog = CatalogClient::new(&config.catalog);

    tracing::info!("Fetching products from {}", config.catalog.base_url);
    let products = catalog.products().await?;
    let matching = filter.apply(&products);
    tracing::info!("{} of {} products match", matching.len(), products.len());

    print!("{}", render_products(&matching));
    Ok(())
}

/// List catalog categories.
#[allow(clippy::print_stdout)]
pub async fn categories(config: &CartConfig) -> Result<(), CatalogError> {
    let catalog = CatalogClient::new(&config.catalog);
    let categories = catalog.categories().await?;

    print!("{}", render_categories(&categories));
    Ok(())
}

fn render_products(products: &[&Product]) -> String {
    if products.is_empty() {
        return "No products found\n".to_string();
    }

    products.iter().fold(String::new(), |mut out, product| {
        let _ = writeln!(
            out,
            "#{:<6} {:<40} {:>10}  {}",
            product.id.as_i64(),
            product.title,
            product.unit_price().display(),
            product.category.name
        );
        out
    })
}

fn render_categories(categories: &[Category]) -> String {
    categories.iter().fold(String::new(), |mut out, category| {
        let _ = writeln!(out, "#{:<6} {}", category.id.as_i64(), category.name);
        out
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use storefront_cart_core::{CategoryId, ProductId};

    use super::*;

    #[test]
    fn test_render_products() {
        let product = Product {
            id: ProductId::new(7),
            title: "Hoodie".to_string(),
            price: Decimal::new(1999, 2),
            description: String::new(),
            category: Category {
                id: CategoryId::new(1),
                name: "Clothes".to_string(),
                image: String::new(),
            },
            images: Vec::new(),
            rating: None,
        };

        let rendered = render_products(&[&product]);

        assert!(rendered.starts_with("#7"));
        assert!(rendered.contains("$19.99"));
        assert!(rendered.trim_end().ends_with("Clothes"));
    }

    #[test]
    fn test_render_no_products() {
        assert_eq!(render_products(&[]), "No products found\n");
    }

    #[test]
    fn test_render_categories() {
        let categories = vec![Category {
            id: CategoryId::new(2),
            name: "Shoes".to_string(),
            image: String::new(),
        }];
        assert_eq!(render_categories(&categories), "#2      Shoes\n");
    }
}
