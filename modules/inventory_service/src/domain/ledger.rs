//! Stock ledger arithmetic
//!
//! Pure functions over products and movements. Every mutation keeps
//! `available_stock == total_added_qty - total_sold_qty` and never lets it
//! drop below zero.

use crate::contract::{
    DailyTotals, InventoryError, MovementKind, Product, ProductAnalytics, RangeTotals,
    StockMovement, Transaction,
};
use super::validation::MAX_AMOUNT;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::{BTreeMap, HashMap};

fn overflow() -> InventoryError {
    InventoryError::validation("stock totals overflow")
}

/// Add to a running amount, keeping it within what storage can hold
fn add_amount(total: Decimal, amount: Decimal) -> Result<Decimal, InventoryError> {
    total
        .checked_add(amount)
        .filter(|sum| *sum <= MAX_AMOUNT)
        .ok_or_else(overflow)
}

fn recompute(product: &mut Product) -> Result<(), InventoryError> {
    product.available_stock = product
        .total_added_qty
        .checked_sub(product.total_sold_qty)
        .ok_or_else(overflow)?;
    Ok(())
}

/// A freshly created product with zero totals
pub fn empty_product(id: i32, name: impl Into<String>) -> Product {
    Product {
        id,
        name: name.into(),
        total_added_qty: 0,
        total_added_amount: Decimal::ZERO,
        total_sold_qty: 0,
        total_sold_amount: Decimal::ZERO,
        available_stock: 0,
    }
}

/// Fold a new movement into the product totals
pub fn apply_movement(
    product: &mut Product,
    kind: MovementKind,
    quantity: i64,
    amount: Decimal,
) -> Result<(), InventoryError> {
    match kind {
        MovementKind::Add => {
            let qty = product
                .total_added_qty
                .checked_add(quantity)
                .ok_or_else(overflow)?;
            product.total_added_amount = add_amount(product.total_added_amount, amount)?;
            product.total_added_qty = qty;
        }
        MovementKind::Sell => {
            if product.available_stock < quantity {
                return Err(InventoryError::InsufficientStock {
                    product: product.name.clone(),
                    available: product.available_stock,
                    requested: quantity,
                });
            }
            let qty = product
                .total_sold_qty
                .checked_add(quantity)
                .ok_or_else(overflow)?;
            product.total_sold_amount = add_amount(product.total_sold_amount, amount)?;
            product.total_sold_qty = qty;
        }
    }
    recompute(product)
}

/// Take a deleted movement back out of the product totals
pub fn revert_movement(product: &mut Product, movement: &StockMovement) -> Result<(), InventoryError> {
    match movement.kind {
        MovementKind::Add => {
            let remaining = product.total_added_qty - movement.quantity;
            if remaining < product.total_sold_qty {
                return Err(InventoryError::conflict(format!(
                    "Cannot delete add history record {}: {} units of '{}' have already been sold",
                    movement.id, product.total_sold_qty, product.name
                )));
            }
            product.total_added_qty = remaining;
            product.total_added_amount -= movement.total_amount;
        }
        MovementKind::Sell => {
            product.total_sold_qty -= movement.quantity;
            product.total_sold_amount -= movement.total_amount;
        }
    }
    recompute(product)
}

fn average(amount: Decimal, qty: i64) -> Option<Decimal> {
    if qty <= 0 {
        return None;
    }
    amount
        .checked_div(Decimal::from(qty))
        .map(|avg| avg.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

/// Average prices and profit for one product
pub fn analytics(product: &Product) -> ProductAnalytics {
    let profit_loss = if !product.total_sold_amount.is_zero() && !product.total_added_amount.is_zero()
    {
        Some(product.total_sold_amount - product.total_added_amount)
    } else {
        None
    };

    ProductAnalytics {
        avg_purchase_price: average(product.total_added_amount, product.total_added_qty),
        avg_selling_price: average(product.total_sold_amount, product.total_sold_qty),
        profit_loss,
        product: product.clone(),
    }
}

impl RangeTotals {
    fn add(&mut self, movement: &StockMovement) {
        match movement.kind {
            MovementKind::Add => {
                self.added_qty += movement.quantity;
                self.added_amount += movement.total_amount;
            }
            MovementKind::Sell => {
                self.sold_qty += movement.quantity;
                self.sold_amount += movement.total_amount;
            }
        }
    }
}

pub fn range_totals(movements: &[StockMovement]) -> RangeTotals {
    let mut totals = RangeTotals::default();
    for movement in movements {
        totals.add(movement);
    }
    totals
}

/// Movements grouped per calendar day, oldest day first
pub fn daily_totals(movements: &[StockMovement]) -> Vec<DailyTotals> {
    let mut by_day: BTreeMap<_, RangeTotals> = BTreeMap::new();
    for movement in movements {
        by_day.entry(movement.date).or_default().add(movement);
    }
    by_day
        .into_iter()
        .map(|(date, totals)| DailyTotals { date, totals })
        .collect()
}

/// Join movements with product names; newest first, ties broken by id.
/// Movements whose product no longer exists are skipped.
pub fn journal(movements: Vec<StockMovement>, products: &[Product]) -> Vec<Transaction> {
    let names: HashMap<i32, &str> = products.iter().map(|p| (p.id, p.name.as_str())).collect();

    let mut transactions: Vec<Transaction> = movements
        .into_iter()
        .filter_map(|m| {
            let product_name = names.get(&m.product_id)?.to_string();
            Some(Transaction {
                id: m.id,
                date: m.date,
                product_id: m.product_id,
                product_name,
                kind: m.kind,
                quantity: m.quantity,
                unit_price: m.unit_price,
                total_amount: m.total_amount,
            })
        })
        .collect();

    transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    transactions
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, d).unwrap()
    }

    fn movement(id: i32, product_id: i32, kind: MovementKind, qty: i64, total: &str, d: u32) -> StockMovement {
        StockMovement {
            id,
            product_id,
            kind,
            quantity: qty,
            unit_price: dec(total) / Decimal::from(qty),
            total_amount: dec(total),
            date: day(d),
        }
    }

    #[test]
    fn test_apply_add_then_sell() {
        let mut product = empty_product(1, "Paracetamol");
        apply_movement(&mut product, MovementKind::Add, 10, dec("25.00")).unwrap();
        apply_movement(&mut product, MovementKind::Sell, 4, dec("16.00")).unwrap();

        assert_eq!(product.total_added_qty, 10);
        assert_eq!(product.total_sold_qty, 4);
        assert_eq!(product.available_stock, 6);
        assert_eq!(product.total_added_amount, dec("25.00"));
        assert_eq!(product.total_sold_amount, dec("16.00"));
    }

    #[test]
    fn test_sell_more_than_available_fails() {
        let mut product = empty_product(1, "Paracetamol");
        apply_movement(&mut product, MovementKind::Add, 2, dec("2.00")).unwrap();

        let err = apply_movement(&mut product, MovementKind::Sell, 3, dec("3.00")).unwrap_err();
        assert_eq!(
            err,
            InventoryError::InsufficientStock {
                product: "Paracetamol".into(),
                available: 2,
                requested: 3,
            }
        );
        assert_eq!(product.total_sold_qty, 0);
    }

    #[test]
    fn test_amount_totals_stay_within_storable_range() {
        let mut product = empty_product(1, "Gauze");
        apply_movement(&mut product, MovementKind::Add, 1, MAX_AMOUNT).unwrap();

        let err = apply_movement(&mut product, MovementKind::Add, 1, dec("0.01")).unwrap_err();
        assert!(matches!(err, InventoryError::Validation { .. }));
        assert_eq!(product.total_added_qty, 1);
        assert_eq!(product.total_added_amount, MAX_AMOUNT);
    }

    #[test]
    fn test_revert_sell_restores_stock() {
        let mut product = empty_product(1, "Ibuprofen");
        apply_movement(&mut product, MovementKind::Add, 10, dec("10.00")).unwrap();
        apply_movement(&mut product, MovementKind::Sell, 5, dec("7.50")).unwrap();

        let sale = movement(2, 1, MovementKind::Sell, 5, "7.50", 2);
        revert_movement(&mut product, &sale).unwrap();
        assert_eq!(product.available_stock, 10);
        assert_eq!(product.total_sold_amount, Decimal::ZERO);
    }

    #[test]
    fn test_revert_add_that_was_already_sold_is_rejected() {
        let mut product = empty_product(1, "Ibuprofen");
        apply_movement(&mut product, MovementKind::Add, 10, dec("10.00")).unwrap();
        apply_movement(&mut product, MovementKind::Sell, 8, dec("12.00")).unwrap();

        let purchase = movement(1, 1, MovementKind::Add, 10, "10.00", 1);
        let err = revert_movement(&mut product, &purchase).unwrap_err();
        assert!(matches!(err, InventoryError::Conflict { .. }));
        assert_eq!(product.total_added_qty, 10);
    }

    #[test]
    fn test_analytics_averages_and_profit() {
        let mut product = empty_product(1, "Syrup");
        apply_movement(&mut product, MovementKind::Add, 3, dec("10.00")).unwrap();
        apply_movement(&mut product, MovementKind::Sell, 2, dec("12.00")).unwrap();

        let stats = analytics(&product);
        assert_eq!(stats.avg_purchase_price, Some(dec("3.33")));
        assert_eq!(stats.avg_selling_price, Some(dec("6.00")));
        assert_eq!(stats.profit_loss, Some(dec("2.00")));
    }

    #[test]
    fn test_analytics_without_sales_has_no_profit() {
        let mut product = empty_product(1, "Syrup");
        apply_movement(&mut product, MovementKind::Add, 3, dec("9.00")).unwrap();

        let stats = analytics(&product);
        assert_eq!(stats.avg_purchase_price, Some(dec("3.00")));
        assert_eq!(stats.avg_selling_price, None);
        assert_eq!(stats.profit_loss, None);
    }

    #[test]
    fn test_daily_totals_merge_both_sides() {
        let movements = vec![
            movement(1, 1, MovementKind::Add, 5, "5.00", 3),
            movement(2, 1, MovementKind::Sell, 2, "4.00", 3),
            movement(3, 1, MovementKind::Add, 1, "1.00", 1),
            movement(4, 2, MovementKind::Add, 4, "8.00", 3),
        ];

        let days = daily_totals(&movements);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, day(1));
        assert_eq!(days[0].totals.sold_qty, 0);
        assert_eq!(days[1].date, day(3));
        assert_eq!(days[1].totals.added_qty, 9);
        assert_eq!(days[1].totals.added_amount, dec("13.00"));
        assert_eq!(days[1].totals.sold_amount, dec("4.00"));
    }

    #[test]
    fn test_journal_sorts_newest_first_and_skips_orphans() {
        let products = vec![empty_product(1, "A"), empty_product(2, "B")];
        let movements = vec![
            movement(1, 1, MovementKind::Add, 1, "1.00", 1),
            movement(2, 2, MovementKind::Add, 1, "1.00", 5),
            movement(3, 1, MovementKind::Sell, 1, "2.00", 5),
            movement(4, 9, MovementKind::Add, 1, "1.00", 7),
        ];

        let lines = journal(movements, &products);
        let ids: Vec<i32> = lines.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
        assert_eq!(lines[0].product_name, "A");
        assert_eq!(lines[0].kind, MovementKind::Sell);
    }
}
