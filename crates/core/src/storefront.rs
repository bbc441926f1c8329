use crate::basket::Basket;
use crate::catalog::Catalog;
use crate::types::{DishId, ShopConfig};
use crate::views;
use log::debug;
use std::fmt;
use std::str::FromStr;

/// Pages reachable by path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Menu,
    /// `None` when the id segment is not a number.
    Dish(Option<DishId>),
    Order,
    About,
    Contact,
    NotFound(String),
}

impl Route {
    /// Maps a URL path to a route.
    ///
    /// # Examples
    ///
    /// ```
    /// use mycobrew_core::storefront::Route;
    /// use mycobrew_core::types::DishId;
    ///
    /// assert_eq!(Route::parse("/dish/4"), Route::Dish(Some(DishId(4))));
    /// assert_eq!(Route::parse("/menu/"), Route::Menu);
    /// assert_eq!(Route::parse("/dish/latte"), Route::Dish(None));
    /// ```
    pub fn parse(path: &str) -> Route {
        let trimmed = path.trim();
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Home,
            ["menu"] => Route::Menu,
            ["order"] => Route::Order,
            ["about"] => Route::About,
            ["contact"] => Route::Contact,
            ["dish", id] => Route::Dish(id.parse::<u32>().ok().map(DishId)),
            _ => Route::NotFound(trimmed.to_string()),
        }
    }
}

impl FromStr for Route {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Route::parse(s))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "/"),
            Route::Menu => write!(f, "/menu"),
            Route::Dish(Some(id)) => write!(f, "/dish/{id}"),
            Route::Dish(None) => write!(f, "/dish/?"),
            Route::Order => write!(f, "/order"),
            Route::About => write!(f, "/about"),
            Route::Contact => write!(f, "/contact"),
            Route::NotFound(path) => write!(f, "{path}"),
        }
    }
}

/// Basket mutations a page can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Add(DishId),
    Increase(DishId),
    Decrease(DishId),
    Remove(DishId),
    SetQuantity(DishId, u32),
    Checkout,
}

/// Session controller: owns the basket for the lifetime of the session and
/// lends it to whichever page is rendered.
#[derive(Debug, Clone)]
pub struct Storefront {
    catalog: Catalog,
    basket: Basket,
    brand: String,
    currency: String,
    current: Route,
}

impl Storefront {
    pub fn new(catalog: Catalog, shop: &ShopConfig) -> Self {
        Self {
            catalog,
            basket: Basket::new(),
            brand: shop.brand.clone(),
            currency: shop.currency_symbol.clone(),
            current: Route::Home,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn basket(&self) -> &Basket {
        &self.basket
    }

    pub fn basket_mut(&mut self) -> &mut Basket {
        &mut self.basket
    }

    pub fn current_route(&self) -> &Route {
        &self.current
    }

    /// Switches to the page at `path` and renders it.
    pub fn navigate(&mut self, path: &str) -> String {
        let route = Route::parse(path);
        debug!("navigate {path} -> {route}");
        self.current = route.clone();
        self.render(&route)
    }

    pub fn render(&self, route: &Route) -> String {
        match route {
            Route::Home => views::home(&self.brand),
            Route::Menu => views::menu(&self.catalog, &self.currency),
            Route::Dish(id) => {
                let found = (*id).and_then(|id| self.catalog.dish(id));
                views::dish(found, &self.currency)
            }
            Route::Order => views::order(&self.basket, &self.currency),
            Route::About => views::about(&self.brand),
            Route::Contact => views::contact(),
            Route::NotFound(path) => views::not_found(path),
        }
    }

    pub fn nav(&self) -> String {
        views::nav(&self.brand, &self.basket)
    }

    pub fn footer(&self) -> String {
        views::footer(&self.brand)
    }

    /// Applies a page action and returns the status line to show.
    ///
    /// Adding resolves the id against the catalog first, like the menu and
    /// detail pages do; every other action goes straight to the basket.
    pub fn apply(&mut self, action: Action) -> String {
        match action {
            Action::Add(id) => match self.catalog.dish(id) {
                Some(dish) => {
                    self.basket.add_item(dish);
                    views::added(dish, &self.basket)
                }
                None => views::DISH_NOT_FOUND.to_string(),
            },
            Action::Increase(id) => {
                self.basket.increase(id);
                views::quantity_status(id, &self.basket)
            }
            Action::Decrease(id) => {
                self.basket.decrease(id);
                views::quantity_status(id, &self.basket)
            }
            Action::Remove(id) => {
                self.basket.remove_item(id);
                views::quantity_status(id, &self.basket)
            }
            Action::SetQuantity(id, quantity) => {
                self.basket.set_quantity(id, quantity);
                views::quantity_status(id, &self.basket)
            }
            Action::Checkout => views::CHECKOUT_UNAVAILABLE.to_string(),
        }
    }
}
