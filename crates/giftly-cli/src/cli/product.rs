//! `giftly product` -- render a product card from a JSON record.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use giftly_core::feedback::dialog::strip_html;
use giftly_core::product::ProductCard;
use giftly_types::product::Product;

use crate::state::AppState;

/// Read and parse a product record.
async fn load_product(path: &Path) -> Result<Product> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid product JSON in {}", path.display()))
}

/// Render a card, then optionally open the feedback dialog for it.
pub async fn show_product(
    state: &AppState,
    path: &Path,
    session_id: Option<&str>,
    message_id: Option<&str>,
    feedback: bool,
    json: bool,
) -> Result<()> {
    let product = load_product(path).await?;
    let card = ProductCard::from_product(&product, session_id, message_id);

    if json {
        let out = serde_json::json!({
            "id": card.id,
            "title": card.title,
            "display_price": card.display_price,
            "original_price": card.original_price,
            "description": card.description,
            "brand": card.brand,
            "url": card.url,
            "image": card.image,
            "can_provide_feedback": card.can_provide_feedback(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print_card(&card);
    }

    if feedback {
        match card.feedback_target() {
            Some(target) => super::feedback::open_for_card(state, target, json).await?,
            None => {
                println!(
                    "  {} Feedback needs both --session-id and --message-id.",
                    style("!").yellow().bold()
                );
            }
        }
    }

    Ok(())
}

fn print_card(card: &ProductCard) {
    println!();
    println!("  {}", style(strip_html(&card.title)).bold());
    if let Some(brand) = &card.brand {
        println!("  {}", style(brand).dim());
    }

    match &card.original_price {
        Some(original) => println!(
            "  {}  {}",
            style(&card.display_price).green().bold(),
            style(format!("MRP {original}")).dim()
        ),
        None => println!("  {}", style(&card.display_price).green().bold()),
    }

    if let Some(description) = &card.description {
        println!();
        println!("  {}", strip_html(description));
    }

    println!();
    println!("  {} {}", style("View:").dim(), style(&card.url).cyan().underlined());
    println!("  {} {}", style("Image:").dim(), card.image);
    if card.can_provide_feedback() {
        println!("  {} available (pass --feedback)", style("Feedback:").dim());
    }
    println!();
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn loads_product_with_string_prices() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("product.json");
        tokio::fs::write(
            &path,
            r#"{
                "id": "p-42",
                "title": "Brass Diya",
                "price": "1,499",
                "discounted_price": 999,
                "url": "https://shop.example/p-42",
                "image": ""
            }"#,
        )
        .await
        .unwrap();

        let product = load_product(&path).await.unwrap();
        let card = ProductCard::from_product(&product, Some("s"), Some("m"));
        assert_eq!(card.display_price, "\u{20b9}999");
        assert_eq!(card.original_price.as_deref(), Some("\u{20b9}1,499"));
        assert!(card.can_provide_feedback());
    }

    #[tokio::test]
    async fn invalid_json_is_reported() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.json");
        tokio::fs::write(&path, "{ not json").await.unwrap();
        let err = load_product(&path).await.unwrap_err();
        assert!(err.to_string().contains("Invalid product JSON"));
    }
}
