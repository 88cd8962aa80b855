//! Property tests for catalog queries over arbitrary product sets.

use std::collections::HashMap;

use chrono::{Days, NaiveDate};
use proptest::prelude::*;

use shelf_core::{Category, Money, Product, ProductDraft};
use shelf_store::Catalog;

const CATEGORIES: &[&str] = &["Dairy", "Bakery", "Limpeza"];

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

/// (expiry offset from base date, purchase cents, markup cents, stock, category index)
fn product_fields() -> impl Strategy<Value = (u64, i64, i64, i64, usize)> {
    (0u64..365, 0i64..10_000, 1i64..10_000, 0i64..100, 0..CATEGORIES.len())
}

fn build_catalog(fields: &[(u64, i64, i64, i64, usize)]) -> Catalog {
    let products = fields.iter().enumerate().map(|(i, &(offset, purchase, markup, qty, cat))| {
        ProductDraft {
            code: format!("PRD{i:05}"),
            name: format!("Product {i}"),
            description: String::new(),
            manufacture_date: base_date(),
            expiry_date: base_date().checked_add_days(Days::new(offset)).unwrap(),
            purchase_price: Money::from_cents(purchase),
            sell_price: Money::from_cents(purchase + markup),
            stock_quantity: qty,
            category: Category::new(CATEGORIES[cat]),
        }
        .validate(today())
        .unwrap()
    });
    Catalog::from_products(products).unwrap()
}

fn codes(products: &[Product]) -> Vec<String> {
    products.iter().map(|p| p.code().to_string()).collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 200,
        ..ProptestConfig::default()
    })]

    /// Property: expired list is exactly the products with expiry before the date.
    #[test]
    fn expired_is_exact_subset(
        fields in prop::collection::vec(product_fields(), 0..40),
        as_of_offset in 0u64..400
    ) {
        let catalog = build_catalog(&fields);
        let as_of = base_date().checked_add_days(Days::new(as_of_offset)).unwrap();

        let expected: Vec<Product> = catalog
            .list()
            .into_iter()
            .filter(|p| p.expiry_date() < as_of)
            .collect();

        prop_assert_eq!(codes(&catalog.list_expired(as_of)), codes(&expected));
    }

    /// Property: near-expiry results stay inside the window, sorted by expiry.
    #[test]
    fn near_expiry_within_window_and_sorted(
        fields in prop::collection::vec(product_fields(), 0..40),
        as_of_offset in 0u64..400,
        window in 0u32..90
    ) {
        let catalog = build_catalog(&fields);
        let as_of = base_date().checked_add_days(Days::new(as_of_offset)).unwrap();
        let until = as_of.checked_add_days(Days::new(u64::from(window))).unwrap();

        let near = catalog.list_near_expiry(as_of, window);
        for p in &near {
            prop_assert!(p.expiry_date() >= as_of && p.expiry_date() <= until);
        }
        prop_assert!(near.windows(2).all(|w| w[0].expiry_date() <= w[1].expiry_date()));

        let in_window = catalog
            .list()
            .iter()
            .filter(|p| p.expiry_date() >= as_of && p.expiry_date() <= until)
            .count();
        prop_assert_eq!(near.len(), in_window);
    }

    /// Property: low-stock results are below the threshold, sorted by quantity.
    #[test]
    fn low_stock_below_threshold_and_sorted(
        fields in prop::collection::vec(product_fields(), 0..40),
        threshold in 0i64..120
    ) {
        let catalog = build_catalog(&fields);
        let low = catalog.list_low_stock(threshold);

        prop_assert!(low.iter().all(|p| p.stock_quantity() < threshold));
        prop_assert!(low.windows(2).all(|w| w[0].stock_quantity() <= w[1].stock_quantity()));
        prop_assert_eq!(
            low.len(),
            catalog.list().iter().filter(|p| p.stock_quantity() < threshold).count()
        );
    }

    /// Property: average times count matches the category's sell price sum.
    #[test]
    fn average_times_count_is_sum(fields in prop::collection::vec(product_fields(), 0..40)) {
        let catalog = build_catalog(&fields);
        let averages = catalog.average_sell_price_by_category();

        let mut sums: HashMap<String, (f64, usize)> = HashMap::new();
        for p in catalog.list() {
            let entry = sums.entry(p.category().name.clone()).or_insert((0.0, 0));
            entry.0 += p.sell_price().to_f64();
            entry.1 += 1;
        }

        prop_assert_eq!(averages.len(), sums.len());
        for (name, (sum, count)) in sums {
            let avg = averages[&name];
            prop_assert!((avg * count as f64 - sum).abs() < 1e-6 * sum.max(1.0));
        }
    }

    /// Property: add grows the catalog by one, remove shrinks it by one,
    /// removing an absent code changes nothing.
    #[test]
    fn add_remove_change_length(fields in prop::collection::vec(product_fields(), 1..20)) {
        let catalog = build_catalog(&fields[1..]);
        let before = catalog.len();

        let extra = build_catalog(&fields[..1]).list().remove(0);
        let extra = ProductDraft { code: "EXTRA001".to_string(), ..extra.to_draft() }
            .validate(today())
            .unwrap();

        catalog.add(extra.clone()).unwrap();
        prop_assert_eq!(catalog.len(), before + 1);
        prop_assert_eq!(catalog.find_by_code("EXTRA001"), Some(extra));

        prop_assert!(catalog.remove("EXTRA001"));
        prop_assert_eq!(catalog.len(), before);
        prop_assert!(catalog.find_by_code("EXTRA001").is_none());

        prop_assert!(!catalog.remove("EXTRA001"));
        prop_assert_eq!(catalog.len(), before);
    }
}
