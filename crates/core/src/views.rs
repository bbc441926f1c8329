//! Plain-text page renderings. Views borrow state, they never own it.

use crate::basket::Basket;
use crate::catalog::Catalog;
use crate::content::{CONTACT, MUSHROOMS, NAV_LINKS, SOCIAL_LINKS, TAGLINE, TESTIMONIALS};
use crate::types::{Dish, DishId};

pub const EMPTY_ORDER: &str = "No items in your order yet!";
pub const DISH_NOT_FOUND: &str = "Dish not found.";
pub const CHECKOUT_UNAVAILABLE: &str = "Checkout is not available yet. Your basket is unchanged.";

fn banner(title: &str, subtitle: &str) -> Vec<String> {
    let rule = "=".repeat(title.chars().count().max(subtitle.chars().count()));
    vec![rule.clone(), title.to_string(), subtitle.to_string(), rule]
}

/// Navigation bar with the basket badge on the order link.
pub fn nav(brand: &str, basket: &Basket) -> String {
    let links: Vec<String> = NAV_LINKS
        .iter()
        .map(|link| {
            if link.path == "/order" {
                format!("{} ({})", link.label, basket.total_item_count())
            } else {
                link.label.to_string()
            }
        })
        .collect();
    format!("{brand} | {}", links.join(" | "))
}

pub fn home(brand: &str) -> String {
    let mut lines = banner(&format!("Welcome to {brand}"), TAGLINE);
    lines.push(String::new());
    lines.push("What our customers say".to_string());
    for t in TESTIMONIALS.iter() {
        lines.push(format!("  \"{}\"", t.quote));
        lines.push(format!("    - {}, {}", t.name, t.role));
    }
    lines.join("\n")
}

pub fn menu(catalog: &Catalog, currency: &str) -> String {
    let mut lines = banner(
        "Our Menu",
        "Explore our functional mushroom-infused coffee and matcha creations",
    );
    if catalog.is_empty() {
        lines.push("No menu items available.".to_string());
        return lines.join("\n");
    }
    for category in catalog.categories() {
        lines.push(String::new());
        lines.push(format!("## {}", category.name));
        for dish in &category.items {
            lines.push(format!(
                "  [{}] {} - {}",
                dish.id,
                dish.name,
                dish.price.with_symbol(currency)
            ));
            lines.push(format!("      {}", dish.description));
        }
    }
    lines.join("\n")
}

pub fn dish(found: Option<&Dish>, currency: &str) -> String {
    let Some(dish) = found else {
        return DISH_NOT_FOUND.to_string();
    };
    let mut lines = banner(
        &dish.name,
        "Discover the unique blend of flavor and function in every sip",
    );
    lines.push(String::new());
    lines.push("Description".to_string());
    lines.push(format!("  {}", dish.description));
    lines.push(String::new());
    lines.push(format!("Price: {}", dish.price.with_symbol(currency)));
    lines.push(format!("Image: {}", dish.image));
    lines.push(format!("(use /add {} to add it to your order)", dish.id));
    lines.join("\n")
}

/// Order page: one row per distinct dish plus totals.
pub fn order(basket: &Basket, currency: &str) -> String {
    let mut lines = banner("Your Order", TAGLINE);
    if basket.is_empty() {
        lines.push(EMPTY_ORDER.to_string());
        lines.push("Explore the menu with /menu".to_string());
        return lines.join("\n");
    }
    for row in basket.grouped_by_dish() {
        lines.push(format!(
            "  [{}] {} x{} - {}",
            row.dish.id,
            row.dish.name,
            row.quantity,
            row.line_total().with_symbol(currency)
        ));
    }
    lines.push(String::new());
    lines.push(format!("Total Items: {}", basket.total_item_count()));
    lines.push(format!(
        "Estimated Total: {}",
        basket.total_price().with_symbol(currency)
    ));
    lines.join("\n")
}

/// Raw line items exactly as the basket stores them.
pub fn basket_lines(basket: &Basket) -> String {
    if basket.is_empty() {
        return "basket is empty".to_string();
    }
    basket
        .items()
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{i}: dish {} x{}", line.dish_id(), line.quantity))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn about(brand: &str) -> String {
    let mut lines = banner(
        "About Us",
        "Discover the power of functional mushrooms in every cup",
    );
    lines.push(String::new());
    lines.push(format!(
        "{brand} blends coffee and matcha with four functional mushrooms:"
    ));
    for m in MUSHROOMS.iter() {
        lines.push(format!("  * {}: {}", m.name, m.description));
    }
    lines.join("\n")
}

pub fn contact() -> String {
    let mut lines = banner(
        "Contact Us",
        "We're here to help you on your wellness journey",
    );
    lines.push(String::new());
    lines.push(format!("Address: {}", CONTACT.address));
    lines.push(format!("Phone:   {}", CONTACT.phone));
    lines.push(format!("Email:   {}", CONTACT.email));
    lines.push("Opening hours:".to_string());
    for hours in CONTACT.opening_hours.iter() {
        lines.push(format!("  {hours}"));
    }
    lines.push(format!("Follow us: {}", social_links()));
    lines.push(String::new());
    lines.push("Send us a message with /send, or `mycobrew contact --name .. --email .. --message ..`.".to_string());
    lines.join("\n")
}

fn social_links() -> String {
    SOCIAL_LINKS
        .iter()
        .map(|link| format!("{} <{}>", link.label, link.url))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Short footer printed under every page.
pub fn footer(brand: &str) -> String {
    [
        "-".repeat(40),
        format!("{} | {} | {}", CONTACT.address, CONTACT.phone, CONTACT.email),
        format!("© {brand}. All rights reserved."),
    ]
    .join("\n")
}

pub fn not_found(path: &str) -> String {
    format!("No page at `{path}`.")
}

pub fn added(dish: &Dish, basket: &Basket) -> String {
    format!(
        "added {} (now x{})",
        dish.name,
        basket.quantity_of(dish.id).unwrap_or(0)
    )
}

pub fn quantity_status(id: DishId, basket: &Basket) -> String {
    match basket.quantity_of(id) {
        Some(q) => format!("dish {id} now x{q}"),
        None => format!("dish {id} is not in your order"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::types::{LineItem, Price};

    fn catalog() -> Catalog {
        Catalog::new(StaticCatalog::categories()).expect("catalog")
    }

    #[test]
    fn nav_badge_counts_units() {
        let catalog = catalog();
        let mut basket = Basket::new();
        let brew = catalog.dish(DishId(1)).expect("dish");
        basket.add_item(brew);
        basket.add_item(brew);
        assert!(nav("mycoBrew", &basket).ends_with("Order (2)"));
    }

    #[test]
    fn contact_page_lists_details_and_socials() {
        let page = contact();
        assert!(page.contains("Phone:   +44 123 456 7890"));
        assert!(page.contains("Email:   info@mycobrew.com"));
        assert!(page.contains("123 Mushroom Lane, London, UK"));
        assert!(page.contains("Sat-Sun: 9:00 AM - 5:00 PM"));
        assert!(page.contains("Instagram <https://instagram.com>"));
        assert!(page.contains("/send"));
    }

    #[test]
    fn footer_carries_brand_and_contact_line() {
        let text = footer("mycoBrew");
        assert!(text.ends_with("© mycoBrew. All rights reserved."));
        assert!(text.contains("+44 123 456 7890 | info@mycobrew.com"));
    }

    #[test]
    fn menu_lists_categories_and_prices() {
        let page = menu(&catalog(), "£");
        assert!(page.contains("## Coffee Creations"));
        assert!(page.contains("## Matcha Magic"));
        assert!(page.contains("[3] Earthy Espresso - £4.80"));
    }

    #[test]
    fn empty_menu_has_placeholder() {
        let empty = Catalog::new(vec![]).expect("empty catalog");
        assert!(menu(&empty, "£").contains("No menu items available."));
    }

    #[test]
    fn unknown_dish_renders_not_found() {
        assert_eq!(dish(None, "£"), DISH_NOT_FOUND);
    }

    #[test]
    fn order_groups_duplicates_and_totals() {
        let catalog = catalog();
        let brew = catalog.dish(DishId(1)).expect("dish").clone();
        let mocha = catalog.dish(DishId(2)).expect("dish").clone();
        let basket = Basket::from_items(vec![
            LineItem { dish: brew.clone(), quantity: 1 },
            LineItem { dish: mocha, quantity: 1 },
            LineItem { dish: brew, quantity: 1 },
        ]);
        let page = order(&basket, "£");
        assert!(page.contains("[1] Brainstorm Brew x2 - £9.00"));
        assert!(page.contains("Total Items: 3"));
        assert!(page.contains("Estimated Total: £13.75"));
    }

    #[test]
    fn empty_order_message() {
        assert!(order(&Basket::new(), "£").contains(EMPTY_ORDER));
    }

    #[test]
    fn about_lists_mushrooms() {
        let page = about("mycoBrew");
        for name in ["Lion's Mane", "Cordyceps", "Chaga", "Reishi"] {
            assert!(page.contains(name));
        }
    }

    #[test]
    fn raw_lines_show_slots() {
        let d = catalog().dish(DishId(6)).expect("dish").clone();
        let basket = Basket::from_items(vec![
            LineItem { dish: d.clone(), quantity: 1 },
            LineItem { dish: Dish { price: Price::ZERO, ..d }, quantity: 2 },
        ]);
        assert_eq!(basket_lines(&basket), "0: dish 6 x1\n1: dish 6 x2");
    }
}
