use crate::types::{Dish, DishId, LineItem, Price};
use log::debug;

/// Session basket: an ordered list of line items.
///
/// Mutations never fail. Dish ids are not checked against any catalog, and
/// quantities written through [`Basket::set_quantity`] are stored as given.
///
/// # Examples
///
/// ```
/// use mycobrew_core::basket::Basket;
/// use mycobrew_core::types::{Dish, DishId, Price};
///
/// let dish = Dish {
///     id: DishId(1),
///     name: "Brainstorm Brew".to_string(),
///     description: String::new(),
///     price: Price::from_minor_units(450),
///     image: String::new(),
/// };
/// let mut basket = Basket::new();
/// basket.add_item(&dish);
/// basket.add_item(&dish);
/// assert_eq!(basket.items().len(), 1);
/// assert_eq!(basket.total_item_count(), 2);
/// assert_eq!(basket.total_price().to_string(), "9.00");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Basket {
    items: Vec<LineItem>,
}

impl Basket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a basket from raw line items, duplicates included.
    pub fn from_items(items: Vec<LineItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Bumps the first line for `dish.id` by one, or appends a new line with
    /// quantity 1.
    pub fn add_item(&mut self, dish: &Dish) {
        match self.position(dish.id) {
            Some(index) => {
                let line = &mut self.items[index];
                line.quantity = line.quantity.saturating_add(1);
                debug!("basket: dish {} quantity -> {}", dish.id, line.quantity);
            }
            None => {
                self.items.push(LineItem {
                    dish: dish.clone(),
                    quantity: 1,
                });
                debug!("basket: appended dish {}", dish.id);
            }
        }
    }

    /// Removes the first line slot for `id`, whatever its quantity.
    pub fn remove_item(&mut self, id: DishId) {
        if let Some(index) = self.position(id) {
            self.items.remove(index);
            debug!("basket: removed line {index} for dish {id}");
        }
    }

    /// Overwrites the quantity of every line for `id`.
    pub fn set_quantity(&mut self, id: DishId, quantity: u32) {
        for line in self.items.iter_mut().filter(|line| line.dish.id == id) {
            line.quantity = quantity;
        }
        debug!("basket: dish {id} quantity set to {quantity}");
    }

    pub fn quantity_of(&self, id: DishId) -> Option<u32> {
        self.position(id).map(|index| self.items[index].quantity)
    }

    pub fn total_item_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn total_price(&self) -> Price {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// One row per distinct dish in order of first appearance, with the
    /// quantities of duplicate lines summed.
    pub fn grouped_by_dish(&self) -> Vec<LineItem> {
        let mut grouped: Vec<LineItem> = Vec::new();
        for line in &self.items {
            match grouped.iter_mut().find(|row| row.dish.id == line.dish.id) {
                Some(row) => row.quantity = row.quantity.saturating_add(line.quantity),
                None => grouped.push(line.clone()),
            }
        }
        grouped
    }

    /// Stepper "+": first line's quantity plus one, applied to every line
    /// for the id. Unknown ids are ignored.
    pub fn increase(&mut self, id: DishId) {
        if let Some(current) = self.quantity_of(id) {
            self.set_quantity(id, current.saturating_add(1));
        }
    }

    /// Stepper "-": decrements above one, drops the line at exactly one and
    /// leaves zero-quantity lines alone.
    pub fn decrease(&mut self, id: DishId) {
        match self.quantity_of(id) {
            Some(current) if current > 1 => self.set_quantity(id, current - 1),
            Some(1) => self.remove_item(id),
            _ => {}
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    fn position(&self, id: DishId) -> Option<usize> {
        self.items.iter().position(|line| line.dish.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dish(id: u32, pence: u64) -> Dish {
        Dish {
            id: DishId(id),
            name: format!("dish {id}"),
            description: "test dish".to_string(),
            price: Price::from_minor_units(pence),
            image: format!("/images/{id}.jpg"),
        }
    }

    #[test]
    fn first_add_creates_single_line() {
        let mut basket = Basket::new();
        basket.add_item(&dish(7, 500));
        assert_eq!(basket.items().len(), 1);
        assert_eq!(basket.items()[0].dish_id(), DishId(7));
        assert_eq!(basket.items()[0].quantity, 1);
    }

    #[test]
    fn repeated_add_increments_quantity() {
        let mut basket = Basket::new();
        let d = dish(1, 450);
        basket.add_item(&d);
        basket.add_item(&d);
        assert_eq!(basket.items().len(), 1);
        assert_eq!(basket.items()[0].quantity, 2);
    }

    #[test]
    fn add_accepts_ids_outside_any_catalog() {
        let mut basket = Basket::new();
        basket.add_item(&dish(9_999, 1));
        assert_eq!(basket.total_item_count(), 1);
    }

    #[test]
    fn remove_only_line_empties_basket() {
        let mut basket = Basket::new();
        basket.add_item(&dish(2, 475));
        basket.add_item(&dish(2, 475));
        basket.remove_item(DishId(2));
        assert!(basket.is_empty());
    }

    #[test]
    fn remove_missing_id_is_noop() {
        let mut basket = Basket::new();
        basket.add_item(&dish(1, 450));
        let before = basket.clone();
        basket.remove_item(DishId(42));
        assert_eq!(basket, before);
    }

    #[test]
    fn remove_drops_first_duplicate_slot_only() {
        let d = dish(3, 480);
        let mut basket = Basket::from_items(vec![
            LineItem { dish: d.clone(), quantity: 2 },
            LineItem { dish: dish(4, 500), quantity: 1 },
            LineItem { dish: d.clone(), quantity: 5 },
        ]);
        basket.remove_item(DishId(3));
        assert_eq!(basket.items().len(), 2);
        assert_eq!(basket.items()[0].dish_id(), DishId(4));
        assert_eq!(basket.items()[1].quantity, 5);
    }

    #[test]
    fn set_quantity_keeps_price() {
        let mut basket = Basket::new();
        basket.add_item(&dish(1, 450));
        basket.set_quantity(DishId(1), 5);
        assert_eq!(basket.items()[0].quantity, 5);
        assert_eq!(basket.items()[0].dish.price, Price::from_minor_units(450));
    }

    #[test]
    fn set_quantity_touches_every_duplicate_and_stores_zero() {
        let d = dish(3, 480);
        let mut basket = Basket::from_items(vec![
            LineItem { dish: d.clone(), quantity: 2 },
            LineItem { dish: d, quantity: 5 },
        ]);
        basket.set_quantity(DishId(3), 0);
        assert!(basket.items().iter().all(|line| line.quantity == 0));
        assert_eq!(basket.items().len(), 2);
    }

    #[test]
    fn totals_over_mixed_basket() {
        let mut basket = Basket::new();
        basket.add_item(&dish(1, 450));
        basket.add_item(&dish(2, 475));
        basket.add_item(&dish(1, 450));
        assert_eq!(basket.total_item_count(), 3);
        assert_eq!(basket.total_price(), Price::from_minor_units(1375));
        assert_eq!(basket.total_price().to_string(), "13.75");
    }

    #[test]
    fn grouped_view_sums_duplicates_in_first_seen_order() {
        let a = dish(5, 525);
        let b = dish(6, 550);
        let basket = Basket::from_items(vec![
            LineItem { dish: b.clone(), quantity: 1 },
            LineItem { dish: a.clone(), quantity: 2 },
            LineItem { dish: b, quantity: 3 },
        ]);
        let grouped = basket.grouped_by_dish();
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].dish_id(), DishId(6));
        assert_eq!(grouped[0].quantity, 4);
        assert_eq!(grouped[1].quantity, 2);
        assert_eq!(basket.total_item_count(), 6);
    }

    #[test]
    fn decrease_at_one_removes_line() {
        let mut basket = Basket::new();
        basket.add_item(&dish(4, 500));
        basket.decrease(DishId(4));
        assert!(basket.is_empty());
    }

    #[test]
    fn stepper_moves_quantity_both_ways() {
        let mut basket = Basket::new();
        basket.add_item(&dish(4, 500));
        basket.increase(DishId(4));
        basket.increase(DishId(4));
        assert_eq!(basket.quantity_of(DishId(4)), Some(3));
        basket.decrease(DishId(4));
        assert_eq!(basket.quantity_of(DishId(4)), Some(2));
    }

    #[test]
    fn decrease_leaves_zero_quantity_line() {
        let mut basket = Basket::new();
        basket.add_item(&dish(4, 500));
        basket.set_quantity(DishId(4), 0);
        basket.decrease(DishId(4));
        assert_eq!(basket.quantity_of(DishId(4)), Some(0));
    }

    #[test]
    fn stepper_ignores_unknown_ids() {
        let mut basket = Basket::new();
        basket.increase(DishId(1));
        basket.decrease(DishId(1));
        assert!(basket.is_empty());
    }
}
