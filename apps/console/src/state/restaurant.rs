//! Restaurant stores: menu, orders and dining tables.

use oasis_core::types::{DiningTable, MenuCategory, MenuItem, Order, OrderStatus, TableStatus};
use oasis_core::{count_where, group_by, ratio, tally, EntityStore, Money, Ratio, Tally};
use serde::Serialize;

#[derive(Debug, Clone, Default)]
pub struct RestaurantState {
    pub menu: EntityStore<MenuItem>,
    pub orders: EntityStore<Order>,
    pub tables: EntityStore<DiningTable>,
}

/// Menu items in one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    pub category: MenuCategory,
    pub count: usize,
    pub available: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantSummary {
    pub active_orders: usize,
    pub orders_by_status: Vec<Tally<OrderStatus>>,
    /// Sum of served orders.
    pub served_revenue: Money,
    pub table_occupancy: Ratio,
    pub tables_by_status: Vec<Tally<TableStatus>>,
    pub menu: Vec<CategoryCount>,
}

impl RestaurantState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summary(&self) -> RestaurantSummary {
        let orders = self.orders.find_all();
        let tables = self.tables.find_all();

        let menu = group_by(self.menu.find_all(), |item| item.category)
            .into_iter()
            .map(|(category, items)| CategoryCount {
                category,
                count: items.len(),
                available: items.iter().filter(|item| item.available).count(),
            })
            .collect();

        RestaurantSummary {
            active_orders: count_where(orders, Order::is_active),
            orders_by_status: tally(orders),
            served_revenue: orders
                .iter()
                .filter(|o| o.status == OrderStatus::Served)
                .map(|o| o.amount)
                .sum(),
            table_occupancy: ratio(tables, DiningTable::is_occupied),
            tables_by_status: tally(tables),
            menu,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oasis_core::types::{MenuItemDraft, OrderDraft, OrderSource};
    use oasis_core::Token;

    fn dish(name: &str, category: MenuCategory) -> MenuItemDraft {
        MenuItemDraft {
            name: name.to_string(),
            category,
            price: Money::from_units(5_000),
            description: None,
        }
    }

    fn order(amount: i64) -> OrderDraft {
        OrderDraft {
            source: OrderSource::Table,
            source_number: "4".to_string(),
            items: "Attiéké poisson".to_string(),
            amount: Money::from_units(amount),
            special_instructions: None,
        }
    }

    #[test]
    fn test_menu_counts_per_category() {
        let mut restaurant = RestaurantState::new();
        restaurant
            .menu
            .insert_with(|id| MenuItem::new(id, dish("Poulet braisé", MenuCategory::Mains)));
        let juice = restaurant
            .menu
            .insert_with(|id| MenuItem::new(id, dish("Bissap", MenuCategory::Drinks)))
            .id;
        let toggle = restaurant.menu.get(juice).map(MenuItem::availability_toggle);
        if let Some(patch) = toggle {
            restaurant.menu.update(juice, patch);
        }

        let summary = restaurant.summary();
        assert_eq!(summary.menu.len(), MenuCategory::ALL.len());
        assert_eq!(
            summary.menu[1],
            CategoryCount {
                category: MenuCategory::Drinks,
                count: 1,
                available: 0,
            }
        );
    }

    #[test]
    fn test_served_revenue_and_active_orders() {
        let now = chrono::Utc::now();
        let mut restaurant = RestaurantState::new();
        let served = restaurant
            .orders
            .insert_with(|id| Order::new(id, order(12_500), now))
            .id;
        restaurant
            .orders
            .insert_with(|id| Order::new(id, order(4_000), now));
        restaurant.orders.transition(served, OrderStatus::Served);

        let summary = restaurant.summary();
        assert_eq!(summary.active_orders, 1);
        assert_eq!(summary.served_revenue, Money::from_units(12_500));
    }

    #[test]
    fn test_served_revenue_saturates() {
        let now = chrono::Utc::now();
        let mut restaurant = RestaurantState::new();
        for _ in 0..2 {
            let id = restaurant
                .orders
                .insert_with(|id| Order::new(id, order(i64::MAX / 2 + 1), now))
                .id;
            restaurant.orders.transition(id, OrderStatus::Served);
        }

        let summary = restaurant.summary();
        assert_eq!(summary.served_revenue, Money::from_units(i64::MAX));
    }
}
