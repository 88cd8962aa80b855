//! # Catalog
//!
//! The in-memory product store and its query surface.
//!
//! ## Storage Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog                                         │
//! │                                                                         │
//! │   RwLock<Records>                                                       │
//! │   ├── index:  HashMap<code, seq>      O(1) lookup / duplicate guard    │
//! │   └── by_seq: BTreeMap<seq, Product>  insertion order for iteration    │
//! │                                                                         │
//! │   add(p)     ── seq = next_seq++ ──► index[p.code] = seq, by_seq[seq] │
//! │   remove(c)  ── seq = index.remove(c) ──► by_seq.remove(seq)          │
//! │   list()     ── by_seq.values() (oldest first)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Locking
//! - Queries take the read lock and may run side by side
//! - `add`, `remove`, `replace`, `clear` and imports take the write lock
//! - Every mutation checks everything it needs before changing state, so a
//!   poisoned lock still guards a consistent collection and is recovered
//!
//! Everything returned is an owned clone: editing it never reaches the store.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::report::CatalogReport;
use crate::text_format;
use shelf_core::{Money, Product};

// =============================================================================
// Import Mode
// =============================================================================

/// What an import does with the records already in the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportMode {
    /// Drop existing records, then load the file.
    #[default]
    Replace,

    /// Keep existing records and append the file's records after them.
    /// Any code already present makes the whole import fail.
    Merge,
}

// =============================================================================
// Records (lock-protected state)
// =============================================================================

#[derive(Debug, Default)]
struct Records {
    by_seq: BTreeMap<u64, Product>,
    index: HashMap<String, u64>,
    next_seq: u64,
}

impl Records {
    fn len(&self) -> usize {
        self.by_seq.len()
    }

    fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    fn get(&self, code: &str) -> Option<&Product> {
        self.index.get(code).and_then(|seq| self.by_seq.get(seq))
    }

    /// Products in insertion order.
    fn iter(&self) -> impl Iterator<Item = &Product> {
        self.by_seq.values()
    }

    fn insert(&mut self, product: Product) -> StoreResult<()> {
        if self.contains(product.code()) {
            return Err(StoreError::duplicate(product.code()));
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.index.insert(product.code().to_string(), seq);
        self.by_seq.insert(seq, product);
        Ok(())
    }

    fn remove(&mut self, code: &str) -> Option<Product> {
        let seq = self.index.remove(code)?;
        self.by_seq.remove(&seq)
    }

    fn clear(&mut self) {
        self.by_seq.clear();
        self.index.clear();
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    fn expired(&self, as_of: NaiveDate) -> Vec<Product> {
        self.iter().filter(|p| p.is_expired(as_of)).cloned().collect()
    }

    fn near_expiry(&self, as_of: NaiveDate, window_days: u32) -> Vec<Product> {
        let until = as_of
            .checked_add_days(Days::new(u64::from(window_days)))
            .unwrap_or(NaiveDate::MAX);

        let mut found: Vec<Product> = self
            .iter()
            .filter(|p| p.expires_between(as_of, until))
            .cloned()
            .collect();
        // stable: equal dates keep insertion order
        found.sort_by_key(|p| p.expiry_date());
        found
    }

    fn low_stock(&self, threshold: i64) -> Vec<Product> {
        let mut found: Vec<Product> = self
            .iter()
            .filter(|p| p.stock_quantity() < threshold)
            .cloned()
            .collect();
        found.sort_by_key(|p| p.stock_quantity());
        found
    }

    fn average_sell_price_by_category(&self) -> BTreeMap<String, f64> {
        let mut sums: BTreeMap<String, PriceSum> = BTreeMap::new();
        for product in self.iter() {
            sums.entry(product.category().name.clone())
                .or_default()
                .add(product.sell_price());
        }

        sums.into_iter()
            .map(|(name, sum)| (name, sum.average()))
            .collect()
    }

    fn total_stock_by_category(&self) -> BTreeMap<String, i64> {
        let mut totals = BTreeMap::new();
        for product in self.iter() {
            let total = totals.entry(product.category().name.clone()).or_insert(0i64);
            *total = total.saturating_add(product.stock_quantity());
        }
        totals
    }

    fn average_margin_by_category(&self) -> BTreeMap<String, f64> {
        let mut sums: BTreeMap<String, (f64, usize)> = BTreeMap::new();
        for product in self.iter() {
            // non-positive sell price: no margin, record not counted
            let Some(margin) = product.margin() else {
                continue;
            };
            let entry = sums
                .entry(product.category().name.clone())
                .or_insert((0.0, 0));
            entry.0 += margin;
            entry.1 += 1;
        }

        sums.into_iter()
            .map(|(name, (total, count))| (name, total / count as f64))
            .collect()
    }

    fn group_by_sector(&self) -> BTreeMap<String, Vec<Product>> {
        let mut groups: BTreeMap<String, Vec<Product>> = BTreeMap::new();
        for product in self.iter() {
            groups
                .entry(product.category().sector_label().to_string())
                .or_default()
                .push(product.clone());
        }
        groups
    }
}

/// Running sum of prices for one category.
///
/// The exact decimal sum is kept while it fits; once an addition would leave
/// the decimal range the sum continues in `f64`.
#[derive(Debug, Default)]
struct PriceSum {
    exact: Money,
    approx: f64,
    count: usize,
    overflowed: bool,
}

impl PriceSum {
    fn add(&mut self, price: Money) {
        self.count += 1;
        self.approx += price.to_f64();
        if self.overflowed {
            return;
        }

        match self.exact.checked_add(price) {
            Some(total) => self.exact = total,
            None => {
                debug!("Exact price sum overflowed, averaging in f64");
                self.overflowed = true;
            }
        }
    }

    fn average(&self) -> f64 {
        let total = if self.overflowed {
            self.approx
        } else {
            self.exact.to_f64()
        };
        total / self.count as f64
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Thread-safe in-memory product catalog.
///
/// ## Usage
/// ```rust
/// use chrono::NaiveDate;
/// use shelf_core::{Category, Money, ProductDraft};
/// use shelf_store::Catalog;
///
/// let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// let soap = ProductDraft {
///     code: "ABC12345".to_string(),
///     name: "Soap".to_string(),
///     description: String::new(),
///     manufacture_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     expiry_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     purchase_price: Money::from_cents(200),
///     sell_price: Money::from_cents(500),
///     stock_quantity: 10,
///     category: Category::new("Limpeza"),
/// }
/// .validate(today)
/// .unwrap();
///
/// let catalog = Catalog::new();
/// catalog.add(soap).unwrap();
///
/// assert!(catalog.find_by_code("ABC12345").is_some());
/// assert_eq!(catalog.list_low_stock(20).len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Catalog {
    records: RwLock<Records>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Catalog::default()
    }

    /// Creates a catalog holding `products` in the given order.
    ///
    /// Fails with `DuplicateKey` if two products share a code.
    pub fn from_products<I>(products: I) -> StoreResult<Self>
    where
        I: IntoIterator<Item = Product>,
    {
        let mut records = Records::default();
        for product in products {
            records.insert(product)?;
        }
        Ok(Catalog {
            records: RwLock::new(records),
        })
    }

    fn read(&self) -> RwLockReadGuard<'_, Records> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Records> {
        self.records.write().unwrap_or_else(PoisonError::into_inner)
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Inserts a validated product.
    ///
    /// Callers are expected to check [`Catalog::find_by_code`] first so they
    /// can report a taken code distinctly; the store still refuses duplicates.
    pub fn add(&self, product: Product) -> StoreResult<()> {
        debug!(code = %product.code(), "Adding product");
        self.write().insert(product)
    }

    /// Removes the product with this code. Absent codes are a no-op.
    ///
    /// Returns whether a record was removed.
    pub fn remove(&self, code: &str) -> bool {
        let removed = self.write().remove(code).is_some();
        debug!(code = %code, removed, "Removing product");
        removed
    }

    /// Replaces the record stored under `old_code` with `product`.
    ///
    /// This is the "edit" flow: the old record goes away and the new one is
    /// appended, so it moves to the end of the listing order. The code may
    /// change. If the new code belongs to a *different* stored record the
    /// call fails with `DuplicateKey` and nothing changes. When `old_code`
    /// is not stored, this behaves like [`Catalog::add`].
    pub fn replace(&self, old_code: &str, product: Product) -> StoreResult<()> {
        debug!(old_code = %old_code, new_code = %product.code(), "Replacing product");

        let mut records = self.write();
        if product.code() != old_code && records.contains(product.code()) {
            return Err(StoreError::duplicate(product.code()));
        }

        records.remove(old_code);
        records.insert(product)
    }

    /// Removes every record.
    pub fn clear(&self) {
        debug!("Clearing catalog");
        self.write().clear();
    }

    // -------------------------------------------------------------------------
    // Lookups
    // -------------------------------------------------------------------------

    /// Returns a copy of the product with this code, if stored.
    pub fn find_by_code(&self, code: &str) -> Option<Product> {
        self.read().get(code).cloned()
    }

    /// Returns a copy of every product, oldest first.
    pub fn list(&self) -> Vec<Product> {
        self.read().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // -------------------------------------------------------------------------
    // Reports
    // -------------------------------------------------------------------------

    /// Products whose expiry date is strictly before `as_of`, in insertion
    /// order.
    pub fn list_expired(&self, as_of: NaiveDate) -> Vec<Product> {
        self.read().expired(as_of)
    }

    /// Products expiring within `[as_of, as_of + window_days]` (both ends
    /// included), soonest first; equal dates keep insertion order.
    pub fn list_near_expiry(&self, as_of: NaiveDate, window_days: u32) -> Vec<Product> {
        self.read().near_expiry(as_of, window_days)
    }

    /// Products with `stock_quantity < threshold`, lowest stock first; equal
    /// quantities keep insertion order.
    pub fn list_low_stock(&self, threshold: i64) -> Vec<Product> {
        self.read().low_stock(threshold)
    }

    /// Mean sell price per category name. Categories with no products do not
    /// appear.
    pub fn average_sell_price_by_category(&self) -> BTreeMap<String, f64> {
        self.read().average_sell_price_by_category()
    }

    /// Total stock quantity per category name.
    pub fn total_stock_by_category(&self) -> BTreeMap<String, i64> {
        self.read().total_stock_by_category()
    }

    /// Mean margin `(sell - purchase) / sell` per category name.
    ///
    /// Each margin is rounded to 6 decimals (half up) before averaging.
    /// Products with a non-positive sell price are left out entirely.
    pub fn average_margin_by_category(&self) -> BTreeMap<String, f64> {
        self.read().average_margin_by_category()
    }

    /// Products grouped by category sector (or [`shelf_core::NO_SECTOR`]),
    /// each group in insertion order.
    pub fn group_by_sector(&self) -> BTreeMap<String, Vec<Product>> {
        self.read().group_by_sector()
    }

    /// Takes every report at once from a single consistent view.
    pub fn report(&self, as_of: NaiveDate, window_days: u32, low_stock_threshold: i64) -> CatalogReport {
        let records = self.read();

        CatalogReport {
            as_of,
            product_count: records.len(),
            expired: records.expired(as_of),
            near_expiry: records.near_expiry(as_of, window_days),
            low_stock: records.low_stock(low_stock_threshold),
            average_sell_price_by_category: records.average_sell_price_by_category(),
            total_stock_by_category: records.total_stock_by_category(),
            average_margin_by_category: records.average_margin_by_category(),
        }
    }

    // -------------------------------------------------------------------------
    // Text export / import
    // -------------------------------------------------------------------------

    /// Encodes every product in the semicolon text format.
    pub fn export_text(&self) -> String {
        text_format::encode(self.read().iter())
    }

    /// Loads products from semicolon text.
    ///
    /// All or nothing: the whole text is decoded and validated (against
    /// today's date) before the catalog is touched. Fails with
    /// `MalformedRecord` on a bad line and `DuplicateKey` when a code repeats
    /// inside the text or, in [`ImportMode::Merge`], is already stored.
    ///
    /// Returns the number of products loaded.
    pub fn import_text(&self, text: &str, mode: ImportMode) -> StoreResult<usize> {
        let today = Local::now().date_naive();
        let products = text_format::decode(text, today)?;

        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.code()) {
                return Err(StoreError::duplicate(product.code()));
            }
        }

        let count = products.len();
        let mut records = self.write();
        match mode {
            ImportMode::Replace => records.clear(),
            ImportMode::Merge => {
                if let Some(taken) = products.iter().find(|p| records.contains(p.code())) {
                    return Err(StoreError::duplicate(taken.code()));
                }
            }
        }

        for product in products {
            records.insert(product)?;
        }

        info!(count, ?mode, total = records.len(), "Imported products");
        Ok(count)
    }

    /// Writes [`Catalog::export_text`] to `path`. Returns the number of
    /// products written.
    pub fn export_to_path(&self, path: impl AsRef<Path>) -> StoreResult<usize> {
        let path = path.as_ref();
        let (text, count) = {
            let records = self.read();
            (text_format::encode(records.iter()), records.len())
        };

        fs::write(path, text)?;
        info!(count, path = %path.display(), "Exported products");
        Ok(count)
    }

    /// Reads `path` and imports it with [`Catalog::import_text`].
    pub fn import_from_path(&self, path: impl AsRef<Path>, mode: ImportMode) -> StoreResult<usize> {
        let path = path.as_ref();
        debug!(path = %path.display(), ?mode, "Importing products");

        let text = fs::read_to_string(path)?;
        self.import_text(&text, mode)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_core::{Category, ProductDraft};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn product(code: &str, category: &str, sell_cents: i64, qty: i64, expiry: NaiveDate) -> Product {
        ProductDraft {
            code: code.to_string(),
            name: format!("Product {code}"),
            description: String::new(),
            manufacture_date: date(2024, 1, 1),
            expiry_date: expiry,
            purchase_price: Money::from_cents(100),
            sell_price: Money::from_cents(sell_cents),
            stock_quantity: qty,
            category: Category::new(category),
        }
        .validate(date(2024, 6, 1))
        .unwrap()
    }

    fn codes(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.code()).collect()
    }

    #[test]
    fn test_catalog_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Catalog>();
    }

    #[test]
    fn test_add_and_find() {
        let catalog = Catalog::new();
        let p = product("AAAA0001", "Food", 500, 5, date(2025, 1, 1));

        catalog.add(p.clone()).unwrap();

        assert_eq!(catalog.find_by_code("AAAA0001"), Some(p));
        assert_eq!(catalog.find_by_code("ZZZZ9999"), None);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_duplicate_add_keeps_first() {
        let catalog = Catalog::new();
        catalog
            .add(product("AAAA0001", "Food", 500, 5, date(2025, 1, 1)))
            .unwrap();

        let err = catalog
            .add(product("AAAA0001", "Drinks", 900, 1, date(2025, 1, 1)))
            .unwrap_err();

        assert!(matches!(err, StoreError::DuplicateKey { .. }));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.find_by_code("AAAA0001").unwrap().category().name, "Food");
    }

    #[test]
    fn test_remove() {
        let catalog = Catalog::new();
        catalog
            .add(product("AAAA0001", "Food", 500, 5, date(2025, 1, 1)))
            .unwrap();

        assert!(!catalog.remove("NOPE0000"));
        assert_eq!(catalog.len(), 1);

        assert!(catalog.remove("AAAA0001"));
        assert!(catalog.is_empty());
        assert_eq!(catalog.find_by_code("AAAA0001"), None);
    }

    #[test]
    fn test_list_keeps_insertion_order_after_removal() {
        let catalog = Catalog::new();
        for code in ["CCCC0003", "AAAA0001", "BBBB0002"] {
            catalog.add(product(code, "Food", 500, 5, date(2025, 1, 1))).unwrap();
        }
        catalog.remove("AAAA0001");
        catalog.add(product("AAAA0001", "Food", 500, 5, date(2025, 1, 1))).unwrap();

        assert_eq!(codes(&catalog.list()), ["CCCC0003", "BBBB0002", "AAAA0001"]);
    }

    #[test]
    fn test_snapshot_is_disconnected() {
        let catalog = Catalog::new();
        catalog.add(product("AAAA0001", "Food", 500, 5, date(2025, 1, 1))).unwrap();

        let mut snapshot = catalog.list();
        snapshot.clear();

        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_replace() {
        let catalog = Catalog::new();
        catalog.add(product("AAAA0001", "Food", 500, 5, date(2025, 1, 1))).unwrap();
        catalog.add(product("BBBB0002", "Food", 500, 5, date(2025, 1, 1))).unwrap();

        // same code, new values, moves to the end
        catalog
            .replace("AAAA0001", product("AAAA0001", "Food", 700, 9, date(2025, 1, 1)))
            .unwrap();
        assert_eq!(codes(&catalog.list()), ["BBBB0002", "AAAA0001"]);
        assert_eq!(catalog.find_by_code("AAAA0001").unwrap().stock_quantity(), 9);

        // changing the code onto another record is refused
        let err = catalog
            .replace("AAAA0001", product("BBBB0002", "Food", 700, 9, date(2025, 1, 1)))
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey { .. }));
        assert_eq!(catalog.len(), 2);

        // changing to a free code
        catalog
            .replace("AAAA0001", product("CCCC0003", "Food", 700, 9, date(2025, 1, 1)))
            .unwrap();
        assert_eq!(catalog.find_by_code("AAAA0001"), None);
        assert!(catalog.find_by_code("CCCC0003").is_some());
    }

    #[test]
    fn test_list_expired() {
        let catalog = Catalog::new();
        catalog.add(product("AAAA0001", "Food", 500, 5, date(2024, 3, 1))).unwrap();
        catalog.add(product("BBBB0002", "Food", 500, 5, date(2024, 6, 1))).unwrap();
        catalog.add(product("CCCC0003", "Food", 500, 5, date(2024, 2, 1))).unwrap();

        let expired = catalog.list_expired(date(2024, 6, 1));
        assert_eq!(codes(&expired), ["AAAA0001", "CCCC0003"]);

        assert!(catalog.list_expired(date(2024, 1, 1)).is_empty());
    }

    #[test]
    fn test_list_near_expiry_sorted_and_inclusive() {
        let catalog = Catalog::new();
        let as_of = date(2024, 6, 1);
        catalog.add(product("LATE0001", "Food", 500, 5, date(2024, 7, 1))).unwrap();
        catalog.add(product("EDGE0002", "Food", 500, 5, date(2024, 6, 11))).unwrap();
        catalog.add(product("TODAY003", "Food", 500, 5, as_of)).unwrap();
        catalog.add(product("PAST0004", "Food", 500, 5, date(2024, 5, 31))).unwrap();
        catalog.add(product("EDGE0005", "Food", 500, 5, date(2024, 6, 11))).unwrap();

        let near = catalog.list_near_expiry(as_of, 10);
        assert_eq!(codes(&near), ["TODAY003", "EDGE0002", "EDGE0005"]);

        assert_eq!(codes(&catalog.list_near_expiry(as_of, 0)), ["TODAY003"]);
    }

    #[test]
    fn test_list_low_stock_sorted() {
        let catalog = Catalog::new();
        catalog.add(product("AAAA0001", "Food", 500, 7, date(2025, 1, 1))).unwrap();
        catalog.add(product("BBBB0002", "Food", 500, 2, date(2025, 1, 1))).unwrap();
        catalog.add(product("CCCC0003", "Food", 500, 10, date(2025, 1, 1))).unwrap();
        catalog.add(product("DDDD0004", "Food", 500, 2, date(2025, 1, 1))).unwrap();

        let low = catalog.list_low_stock(10);
        assert_eq!(codes(&low), ["BBBB0002", "DDDD0004", "AAAA0001"]);
        assert!(catalog.list_low_stock(0).is_empty());
    }

    #[test]
    fn test_category_aggregates() {
        let catalog = Catalog::new();
        catalog.add(product("AAAA0001", "Food", 300, 4, date(2025, 1, 1))).unwrap();
        catalog.add(product("BBBB0002", "Food", 500, 6, date(2025, 1, 1))).unwrap();
        catalog.add(product("CCCC0003", "Drinks", 200, 1, date(2025, 1, 1))).unwrap();

        let averages = catalog.average_sell_price_by_category();
        assert_eq!(averages.len(), 2);
        assert!((averages["Food"] - 4.0).abs() < 1e-9);
        assert!((averages["Drinks"] - 2.0).abs() < 1e-9);

        let stock = catalog.total_stock_by_category();
        assert_eq!(stock["Food"], 10);
        assert_eq!(stock["Drinks"], 1);

        // Food margins: (3-1)/3 = 0.666667, (5-1)/5 = 0.8
        let margins = catalog.average_margin_by_category();
        assert!((margins["Food"] - (0.666667 + 0.8) / 2.0).abs() < 1e-9);
        assert!((margins["Drinks"] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_aggregates_survive_huge_values() {
        let huge = |code: &str| {
            let mut draft = product(code, "Bulk", 500, i64::MAX, date(2025, 1, 1)).to_draft();
            draft.sell_price = Money::parse("50000000000000000000000000000").unwrap();
            draft.validate(date(2024, 6, 1)).unwrap()
        };
        let catalog = Catalog::from_products(vec![huge("HUGE0001"), huge("HUGE0002")]).unwrap();

        let averages = catalog.average_sell_price_by_category();
        assert!((averages["Bulk"] / 5e28 - 1.0).abs() < 1e-9);
        assert_eq!(catalog.total_stock_by_category()["Bulk"], i64::MAX);
    }

    #[test]
    fn test_aggregates_on_empty_catalog() {
        let catalog = Catalog::new();
        assert!(catalog.average_sell_price_by_category().is_empty());
        assert!(catalog.total_stock_by_category().is_empty());
        assert!(catalog.average_margin_by_category().is_empty());
        assert!(catalog.group_by_sector().is_empty());
    }

    #[test]
    fn test_group_by_sector() {
        let catalog = Catalog::new();
        let mut home = product("AAAA0001", "Limpeza", 500, 5, date(2025, 1, 1)).to_draft();
        home.category = Category::new("Limpeza").with_sector("Casa");
        catalog.add(home.validate(date(2024, 6, 1)).unwrap()).unwrap();
        catalog.add(product("BBBB0002", "Food", 500, 5, date(2025, 1, 1))).unwrap();
        catalog.add(product("CCCC0003", "Drinks", 500, 5, date(2025, 1, 1))).unwrap();

        let groups = catalog.group_by_sector();
        assert_eq!(codes(&groups["Casa"]), ["AAAA0001"]);
        assert_eq!(codes(&groups[shelf_core::NO_SECTOR]), ["BBBB0002", "CCCC0003"]);
    }

    #[test]
    fn test_import_replace_and_merge() {
        let source = Catalog::new();
        source.add(product("AAAA0001", "Food", 500, 5, date(2025, 1, 1))).unwrap();
        source.add(product("BBBB0002", "Food", 500, 5, date(2025, 1, 1))).unwrap();
        let text = source.export_text();

        let target = Catalog::new();
        target.add(product("ZZZZ0009", "Food", 500, 5, date(2025, 1, 1))).unwrap();

        // merge keeps existing records and appends
        assert_eq!(target.import_text(&text, ImportMode::Merge).unwrap(), 2);
        assert_eq!(codes(&target.list()), ["ZZZZ0009", "AAAA0001", "BBBB0002"]);

        // merging the same file again collides and changes nothing
        let err = target.import_text(&text, ImportMode::Merge).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey { .. }));
        assert_eq!(target.len(), 3);

        // replace reloads cleanly
        assert_eq!(target.import_text(&text, ImportMode::Replace).unwrap(), 2);
        assert_eq!(codes(&target.list()), ["AAAA0001", "BBBB0002"]);
    }

    #[test]
    fn test_import_is_all_or_nothing() {
        let catalog = Catalog::new();
        catalog.add(product("KEEP0001", "Food", 500, 5, date(2025, 1, 1))).unwrap();

        let text = format!(
            "{}\nAAAA0001;Good;;2024-01-01;2025-01-01;1.00;2.00;1;Food\nBROKEN\n",
            text_format::HEADER
        );
        let err = catalog.import_text(&text, ImportMode::Replace).unwrap_err();

        assert!(matches!(err, StoreError::MalformedRecord { line: 3, .. }));
        assert_eq!(codes(&catalog.list()), ["KEEP0001"]);
    }

    #[test]
    fn test_import_rejects_repeated_code_in_file() {
        let catalog = Catalog::new();
        let line = "AAAA0001;Good;;2024-01-01;2025-01-01;1.00;2.00;1;Food";
        let text = format!("{line}\n{line}\n");

        let err = catalog.import_text(&text, ImportMode::Replace).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey { .. }));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_reloads_own_export() {
        let source = Catalog::new();
        let mut sub_cent = product("AAAA0001", "Food", 500, 5, date(2025, 1, 1)).to_draft();
        sub_cent.purchase_price = Money::parse("1.004").unwrap();
        sub_cent.sell_price = Money::parse("1.006").unwrap();
        source.add(sub_cent.validate(date(2024, 6, 1)).unwrap()).unwrap();
        source.add(product("codigo01", "Food", 500, 5, date(2025, 1, 1))).unwrap();

        let target = Catalog::new();
        let loaded = target.import_text(&source.export_text(), ImportMode::Replace).unwrap();

        assert_eq!(loaded, 2);
        assert_eq!(codes(&target.list()), ["AAAA0001", "codigo01"]);
    }

    #[test]
    fn test_from_products_rejects_duplicates() {
        let p = product("AAAA0001", "Food", 500, 5, date(2025, 1, 1));
        assert!(Catalog::from_products(vec![p.clone(), p]).is_err());
    }
}
