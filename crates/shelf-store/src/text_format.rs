//! # Text Format
//!
//! The semicolon-delimited catalog file: one header line, then one line per
//! product.
//!
//! ```text
//! codigo;nome;descricao;dataFabricacao;dataValidade;precoCompra;precoVenda;quantidade;categoria
//! ABC12345;Soap;Bar soap;2024-01-01;2025-01-01;2.00;5.00;10;Limpeza
//! ```
//!
//! ## Known Limitations
//! - No escaping: a `;` or a line break inside a name, description or
//!   category name corrupts that line on reimport. Export logs a warning for
//!   such records but writes them unchanged.
//! - Only the category name is written. Imported categories have no sector
//!   and no description, so sector grouping does not survive a round trip.
//! - Prices are written with two decimals (half up); extra precision is lost.

use chrono::NaiveDate;
use tracing::warn;

use crate::error::{StoreError, StoreResult};
use shelf_core::{Category, Money, Product, ProductDraft};

/// First line of every exported file.
pub const HEADER: &str =
    "codigo;nome;descricao;dataFabricacao;dataValidade;precoCompra;precoVenda;quantidade;categoria";

/// Field separator.
pub const SEPARATOR: char = ';';

/// Number of fields on every product line.
pub const FIELD_COUNT: usize = 9;

/// A line whose first field is exactly this token is a header and skipped.
const HEADER_TOKEN: &str = "codigo";

// =============================================================================
// Encoding
// =============================================================================

/// Encodes products as a complete file body: header plus one line each,
/// every line terminated by `\n`.
pub fn encode<'a, I>(products: I) -> String
where
    I: IntoIterator<Item = &'a Product>,
{
    let mut out = String::with_capacity(HEADER.len() + 1);
    out.push_str(HEADER);
    out.push('\n');

    for product in products {
        out.push_str(&encode_line(product));
        out.push('\n');
    }

    out
}

/// Encodes a single product line (no trailing newline).
pub fn encode_line(product: &Product) -> String {
    if has_unsafe_text(product) {
        warn!(
            code = %product.code(),
            "Product text contains ';' or a line break; the line will not reimport cleanly"
        );
    }

    format!(
        "{};{};{};{};{};{};{};{};{}",
        product.code(),
        product.name(),
        product.description(),
        product.manufacture_date(),
        product.expiry_date(),
        product.purchase_price().to_fixed2(),
        product.sell_price().to_fixed2(),
        product.stock_quantity(),
        product.category().name,
    )
}

fn has_unsafe_text(product: &Product) -> bool {
    [
        product.name(),
        product.description(),
        product.category().name.as_str(),
    ]
    .iter()
    .any(|text| text.contains(|c: char| c == SEPARATOR || c == '\n' || c == '\r'))
}

// =============================================================================
// Decoding
// =============================================================================

/// Decodes a whole file body.
///
/// Header lines (first field `codigo`) and blank lines are skipped. Every
/// other line must decode and validate, otherwise the first failure is
/// returned and nothing is produced. `today` is the reference day for the
/// manufacture-date rule.
pub fn decode(text: &str, today: NaiveDate) -> StoreResult<Vec<Product>> {
    let mut products = Vec::new();

    for (index, line) in text.lines().enumerate() {
        if is_header(line) || line.trim().is_empty() {
            continue;
        }
        products.push(decode_line(line, index + 1, today)?);
    }

    Ok(products)
}

/// Compares the whole first field: a product code such as `codigo01` is data.
fn is_header(line: &str) -> bool {
    line.split(SEPARATOR).next() == Some(HEADER_TOKEN)
}

/// Decodes one product line. `line_no` is 1-based and only used in errors.
pub fn decode_line(line: &str, line_no: usize, today: NaiveDate) -> StoreResult<Product> {
    let fields: Vec<&str> = line.split(SEPARATOR).collect();
    if fields.len() != FIELD_COUNT {
        return Err(StoreError::malformed(
            line_no,
            format!("expected {FIELD_COUNT} fields, found {}", fields.len()),
        ));
    }

    let draft = ProductDraft {
        code: fields[0].to_string(),
        name: fields[1].to_string(),
        description: fields[2].to_string(),
        manufacture_date: parse_date(fields[3], "dataFabricacao", line_no)?,
        expiry_date: parse_date(fields[4], "dataValidade", line_no)?,
        purchase_price: parse_money(fields[5], "precoCompra", line_no)?,
        sell_price: parse_money(fields[6], "precoVenda", line_no)?,
        stock_quantity: fields[7].parse::<i64>().map_err(|_| {
            StoreError::malformed(line_no, format!("quantidade '{}' is not an integer", fields[7]))
        })?,
        category: Category::new(fields[8]),
    };

    draft
        .validate(today)
        .map_err(|err| StoreError::malformed(line_no, err.to_string()))
}

fn parse_date(field: &str, column: &str, line_no: usize) -> StoreResult<NaiveDate> {
    field.parse::<NaiveDate>().map_err(|_| {
        StoreError::malformed(line_no, format!("{column} '{field}' is not a YYYY-MM-DD date"))
    })
}

fn parse_money(field: &str, column: &str, line_no: usize) -> StoreResult<Money> {
    Money::parse(field)
        .map_err(|_| StoreError::malformed(line_no, format!("{column} '{field}' is not a decimal")))
}

// =============================================================================
// Unit Tests
// =============================================================================
