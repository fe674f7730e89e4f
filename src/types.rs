use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sales tax applied to the customer-visible total (5%)
pub const TAX_RATE: f64 = 0.05;

/// Today's date in the local timezone
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

//==============================================================================
// Header Records
//==============================================================================

/// Customer block of a quotation
///
/// Every field is free text except the quotation date. Empty strings are
/// valid and simply leave the target cell blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerInfo {
    pub name: String,
    pub department: String,
    pub contact_person: String,
    pub phone: String,
    pub fax: String,
    pub mobile: String,
    pub tax_id: String,
    pub address: String,
    pub email: String,
    pub quotation_date: NaiveDate,
}

impl Default for CustomerInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            department: String::new(),
            contact_person: String::new(),
            phone: String::new(),
            fax: String::new(),
            mobile: String::new(),
            tax_id: String::new(),
            address: String::new(),
            email: String::new(),
            quotation_date: today(),
        }
    }
}

/// Salesperson block (cost & margin layouts only)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalespersonInfo {
    pub name: String,
    pub mobile: String,
    pub messaging_id: String,
    pub email: String,
}

//==============================================================================
// Line Items
//==============================================================================

/// One row of the quotation table
///
/// Numeric fields are optional: an absent value counts as 0 everywhere.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItem {
    pub brand: String,
    pub model: String,
    pub spec: String,
    pub quantity: Option<u64>,
    pub unit_price: Option<f64>,
    pub unit_cost: Option<f64>,
    pub supplier: String,
}

impl LineItem {
    /// Create a priced item (no cost, no supplier)
    pub fn new(
        brand: impl Into<String>,
        model: impl Into<String>,
        spec: impl Into<String>,
        quantity: u64,
        unit_price: f64,
    ) -> Self {
        Self {
            brand: brand.into(),
            model: model.into(),
            spec: spec.into(),
            quantity: Some(quantity),
            unit_price: Some(unit_price),
            ..Default::default()
        }
    }

    pub fn with_cost(mut self, unit_cost: f64) -> Self {
        self.unit_cost = Some(unit_cost);
        self
    }

    pub fn with_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = supplier.into();
        self
    }

    /// A row with neither brand nor model is filler
    pub fn is_blank(&self) -> bool {
        self.brand.is_empty() && self.model.is_empty()
    }

    pub fn quantity(&self) -> f64 {
        self.quantity.unwrap_or(0) as f64
    }

    pub fn unit_price(&self) -> f64 {
        self.unit_price.unwrap_or(0.0)
    }

    pub fn unit_cost(&self) -> f64 {
        self.unit_cost.unwrap_or(0.0)
    }

    /// quantity × unit price
    pub fn subtotal_price(&self) -> f64 {
        self.quantity() * self.unit_price()
    }

    /// quantity × unit cost
    pub fn subtotal_cost(&self) -> f64 {
        self.quantity() * self.unit_cost()
    }
}

/// Ordered, caller-owned table of line items
///
/// Row order is significant: item `i` is written to `start_row + i`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemTable {
    rows: Vec<LineItem>,
}

impl ItemTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: LineItem) {
        self.rows.push(item);
    }

    pub fn rows(&self) -> &[LineItem] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.rows.iter()
    }
}

impl From<Vec<LineItem>> for ItemTable {
    fn from(rows: Vec<LineItem>) -> Self {
        Self { rows }
    }
}

impl<'a> IntoIterator for &'a ItemTable {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

//==============================================================================
// Quotation
//==============================================================================

/// Everything one render call needs besides the template and layout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Quotation {
    pub customer: CustomerInfo,
    pub salesperson: Option<SalespersonInfo>,
    pub items: ItemTable,
}

impl Quotation {
    pub fn new(customer: CustomerInfo, items: ItemTable) -> Self {
        Self {
            customer,
            salesperson: None,
            items,
        }
    }

    pub fn with_salesperson(mut self, salesperson: SalespersonInfo) -> Self {
        self.salesperson = Some(salesperson);
        self
    }
}

/// Aggregates derived from an item table
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct QuotationTotals {
    pub total_price: f64,
    pub total_cost: f64,
    pub tax_amount: f64,
    pub grand_total: f64,
    pub total_profit: f64,
    pub profit_margin: f64,
}

impl QuotationTotals {
    /// Sum every row of the table
    pub fn from_items(items: &ItemTable) -> Self {
        Self::from_rows(items)
    }

    /// Sum the given rows only
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a LineItem>) -> Self {
        let (total_price, total_cost) = rows.into_iter().fold((0.0, 0.0), |(price, cost), item| {
            (price + item.subtotal_price(), cost + item.subtotal_cost())
        });

        let tax_amount = total_price * TAX_RATE;
        let total_profit = total_price - total_cost;
        let profit_margin = if total_price > 0.0 {
            total_profit / total_price
        } else {
            0.0
        };

        Self {
            total_price,
            total_cost,
            tax_amount,
            grand_total: total_price + tax_amount,
            total_profit,
            profit_margin,
        }
    }
}
