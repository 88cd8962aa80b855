//! # Catalog Report
//!
//! A point-in-time bundle of every catalog report, taken under one read lock
//! by [`crate::Catalog::report`].
//!
//! The `Display` impl renders a plain-text summary:
//!
//! ```text
//! Catalog report (2024-06-01, 3 products)
//!
//! Expired:
//! - Milk [MILK0001] expired 2024-05-30
//!
//! Average sell price by category:
//! - Dairy: 4.50
//! ...
//! ```

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use shelf_core::Product;

/// Snapshot of the catalog's reports.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogReport {
    /// Reference day for the expiry reports.
    pub as_of: NaiveDate,
    pub product_count: usize,
    pub expired: Vec<Product>,
    pub near_expiry: Vec<Product>,
    pub low_stock: Vec<Product>,
    pub average_sell_price_by_category: BTreeMap<String, f64>,
    pub total_stock_by_category: BTreeMap<String, i64>,
    pub average_margin_by_category: BTreeMap<String, f64>,
}

impl CatalogReport {
    /// True when any product is expired, about to expire or low on stock.
    pub fn needs_attention(&self) -> bool {
        !(self.expired.is_empty() && self.near_expiry.is_empty() && self.low_stock.is_empty())
    }
}

impl fmt::Display for CatalogReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Catalog report ({}, {} products)",
            self.as_of, self.product_count
        )?;

        section(f, "Expired", &self.expired, |f, p| {
            writeln!(f, "- {} [{}] expired {}", p.name(), p.code(), p.expiry_date())
        })?;

        section(f, "Expiring soon", &self.near_expiry, |f, p| {
            writeln!(f, "- {} [{}] expires {}", p.name(), p.code(), p.expiry_date())
        })?;

        section(f, "Low stock", &self.low_stock, |f, p| {
            writeln!(f, "- {} [{}]: {} units", p.name(), p.code(), p.stock_quantity())
        })?;

        let averages: Vec<_> = self.average_sell_price_by_category.iter().collect();
        section(f, "Average sell price by category", &averages, |f, (name, avg)| {
            writeln!(f, "- {name}: {avg:.2}")
        })?;

        let stock: Vec<_> = self.total_stock_by_category.iter().collect();
        section(f, "Stock by category", &stock, |f, (name, qty)| {
            writeln!(f, "- {name}: {qty} units")
        })?;

        let margins: Vec<_> = self.average_margin_by_category.iter().collect();
        section(f, "Average margin by category", &margins, |f, (name, margin)| {
            writeln!(f, "- {name}: {:.1}%", *margin * 100.0)
        })
    }
}

fn section<T>(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    items: &[T],
    mut line: impl FnMut(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "{title}:")?;
    if items.is_empty() {
        return writeln!(f, "- none");
    }
    for item in items {
        line(f, item)?;
    }
    Ok(())
}
