#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(rustdoc::broken_intra_doc_links)]

//! Core library for the mycoBrew storefront.
//!
//! `mycobrew_core` provides:
//! - the session basket via [`basket`]
//! - menu sources and validation via [`catalog`]
//! - path routing and the session controller via [`storefront`]
//! - text page renderings via [`views`] and their copy in [`content`]
//! - the contact form mailer via [`mailer`]
//! - the interactive shop loop via [`shell`]
//! - shared data and configuration types via [`types`]
//!
//! # Quick Start
//!
//! ```
//! use mycobrew_core::catalog::{Catalog, StaticCatalog};
//! use mycobrew_core::storefront::{Action, Storefront};
//! use mycobrew_core::types::{DishId, ShopConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Catalog::from_provider(&StaticCatalog).await?;
//! let mut shop = Storefront::new(catalog, &ShopConfig::default());
//! shop.apply(Action::Add(DishId(1)));
//! shop.apply(Action::Add(DishId(2)));
//! shop.apply(Action::Add(DishId(1)));
//! assert_eq!(shop.basket().total_item_count(), 3);
//! assert!(shop.navigate("/order").contains("£13.75"));
//! # Ok(())
//! # }
//! ```

pub mod basket;
pub mod catalog;
pub mod content;
pub mod mailer;
pub mod shell;
pub mod storefront;
pub mod types;
pub mod views;
