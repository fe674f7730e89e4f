//! Template layouts: which cell means what
//!
//! A layout is the declarative coordinate table for one version of a
//! quotation template. Nothing is discovered from the workbook itself; the
//! renderer writes exactly where the layout says.
//!
//! Two layouts are built in (`simple` and `cost-margin`). Others are loaded
//! from YAML, typically starting from `quoteforge layout <name>`.

use crate::error::{QuoteError, QuoteResult};
use crate::types::{CustomerInfo, SalespersonInfo};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

/// Last column of an .xlsx sheet (XFD)
pub const MAX_COLUMN: u32 = 16_384;
/// Last row of an .xlsx sheet
pub const MAX_ROW: u32 = 1_048_576;

/// Names accepted by [`TemplateLayout::builtin`]
pub const BUILTIN_LAYOUTS: [&str; 2] = ["simple", "cost-margin"];

//==============================================================================
// Cell Addressing
//==============================================================================

/// A sheet column, 1-based (A = 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColumnRef(u32);

impl ColumnRef {
    pub fn new(index: u32) -> QuoteResult<Self> {
        if index == 0 || index > MAX_COLUMN {
            return Err(QuoteError::Layout(format!(
                "Column index {} outside 1..={}",
                index, MAX_COLUMN
            )));
        }
        Ok(Self(index))
    }

    /// Parse column letters (`A`, `f`, `AA`)
    pub fn parse(letters: &str) -> QuoteResult<Self> {
        if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(QuoteError::Layout(format!(
                "Invalid column '{}': expected letters like A or AB",
                letters
            )));
        }
        if letters.len() > 3 {
            return Err(QuoteError::Layout(format!(
                "Column '{}' is beyond the last sheet column XFD",
                letters
            )));
        }

        let index = letters
            .chars()
            .fold(0u32, |acc, c| acc * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1));

        Self::new(index).map_err(|_| {
            QuoteError::Layout(format!(
                "Column '{}' is beyond the last sheet column XFD",
                letters
            ))
        })
    }

    pub fn index(self) -> u32 {
        self.0
    }

    /// Column letters for this index
    pub fn letters(self) -> String {
        let mut result = String::new();
        let mut idx = self.0;

        while idx > 0 {
            let remainder = (idx - 1) % 26;
            result.insert(0, (b'A' + remainder as u8) as char);
            idx = (idx - 1) / 26;
        }

        result
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.letters())
    }
}

impl TryFrom<String> for ColumnRef {
    type Error = QuoteError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value.trim())
    }
}

impl From<ColumnRef> for String {
    fn from(col: ColumnRef) -> Self {
        col.letters()
    }
}

/// Compiled once; every layout address goes through it
fn cell_address_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| match Regex::new(r"^\$?([A-Za-z]+)\$?([0-9]+)$") {
        Ok(pattern) => pattern,
        Err(e) => unreachable!("cell address pattern: {}", e),
    })
}

/// An A1-style cell address, 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CellRef {
    pub column: ColumnRef,
    pub row: u32,
}

impl CellRef {
    pub fn new(column: ColumnRef, row: u32) -> QuoteResult<Self> {
        if row == 0 || row > MAX_ROW {
            return Err(QuoteError::Layout(format!(
                "Row {} outside 1..={}",
                row, MAX_ROW
            )));
        }
        Ok(Self { column, row })
    }

    /// Parse `B12`, `$B$12` or `aa3`
    pub fn parse(address: &str) -> QuoteResult<Self> {
        let captures = cell_address_pattern().captures(address.trim()).ok_or_else(|| {
            QuoteError::Layout(format!(
                "Invalid cell address '{}': expected A1-style like B12",
                address
            ))
        })?;

        let column = ColumnRef::parse(&captures[1])?;
        let row: u32 = captures[2].parse().map_err(|_| {
            QuoteError::Layout(format!("Row in '{}' is beyond the last sheet row", address))
        })?;

        Self::new(column, row).map_err(|_| {
            QuoteError::Layout(format!(
                "Cell address '{}' is outside the sheet (max {}{})",
                address,
                ColumnRef(MAX_COLUMN),
                MAX_ROW
            ))
        })
    }

    /// `(column, row)`, 1-based, as umya-spreadsheet expects
    pub fn coordinate(self) -> (u32, u32) {
        (self.column.index(), self.row)
    }

    /// `(row, column)`, 0-based, as calamine and rust_xlsxwriter expect
    pub fn zero_based(self) -> (u32, u32) {
        (self.row - 1, self.column.index() - 1)
    }

    /// The cell immediately to the left, if any
    pub fn left(self) -> Option<Self> {
        let index = self.column.index();
        (index > 1).then(|| Self {
            column: ColumnRef(index - 1),
            row: self.row,
        })
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column, self.row)
    }
}

impl TryFrom<String> for CellRef {
    type Error = QuoteError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CellRef> for String {
    fn from(cell: CellRef) -> Self {
        cell.to_string()
    }
}

//==============================================================================
// Layout Blocks
//==============================================================================

/// Row policy and block set of a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    /// Priced items only; blank rows are skipped (cursor still advances)
    Simple,
    /// Adds cost columns, salesperson block and totals; every row is written
    CostMargin,
}

impl LayoutKind {
    /// Whether a blank row is left untouched
    pub fn skips_blank_rows(self) -> bool {
        matches!(self, LayoutKind::Simple)
    }
}

/// Customer field → cell. Fields without a cell are not written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CustomerCells {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<CellRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<CellRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<CellRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<CellRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fax: Option<CellRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<CellRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<CellRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<CellRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<CellRef>,
}

impl CustomerCells {
    /// The `(field, cell, text)` table for one customer, in layout order
    pub fn fields<'a>(&self, customer: &'a CustomerInfo) -> Vec<(&'static str, CellRef, &'a str)> {
        [
            ("name", self.name, customer.name.as_str()),
            ("department", self.department, customer.department.as_str()),
            ("contact_person", self.contact_person, customer.contact_person.as_str()),
            ("phone", self.phone, customer.phone.as_str()),
            ("fax", self.fax, customer.fax.as_str()),
            ("mobile", self.mobile, customer.mobile.as_str()),
            ("tax_id", self.tax_id, customer.tax_id.as_str()),
            ("address", self.address, customer.address.as_str()),
            ("email", self.email, customer.email.as_str()),
        ]
        .into_iter()
        .filter_map(|(field, cell, text)| cell.map(|cell| (field, cell, text)))
        .collect()
    }

    /// Field labels used by the starter template generator
    pub fn labels(&self) -> Vec<(CellRef, &'static str)> {
        [
            (self.name, "Customer"),
            (self.department, "Department"),
            (self.contact_person, "Contact"),
            (self.phone, "Phone"),
            (self.fax, "Fax"),
            (self.mobile, "Mobile"),
            (self.tax_id, "Tax ID"),
            (self.address, "Address"),
            (self.email, "E-mail"),
        ]
        .into_iter()
        .filter_map(|(cell, label)| cell.map(|cell| (cell, label)))
        .collect()
    }
}

/// Salesperson field → cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SalespersonCells {
    pub name: CellRef,
    pub mobile: CellRef,
    pub messaging_id: CellRef,
    pub email: CellRef,
}

impl SalespersonCells {
    pub fn fields<'a>(&self, sales: &'a SalespersonInfo) -> [(&'static str, CellRef, &'a str); 4] {
        [
            ("name", self.name, sales.name.as_str()),
            ("mobile", self.mobile, sales.mobile.as_str()),
            ("messaging_id", self.messaging_id, sales.messaging_id.as_str()),
            ("email", self.email, sales.email.as_str()),
        ]
    }

    pub fn labels(&self) -> [(CellRef, &'static str); 4] {
        [
            (self.name, "Sales"),
            (self.mobile, "Sales Mobile"),
            (self.messaging_id, "Messaging ID"),
            (self.email, "Sales E-mail"),
        ]
    }
}

/// Columns of the line-item table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemColumns {
    pub brand: ColumnRef,
    pub model: ColumnRef,
    pub spec: ColumnRef,
    pub quantity: ColumnRef,
    pub unit_price: ColumnRef,
    pub subtotal: ColumnRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_cost: Option<ColumnRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtotal_cost: Option<ColumnRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<ColumnRef>,
}

impl ItemColumns {
    /// Header captions for the starter template, in column order
    pub fn headers(&self) -> Vec<(ColumnRef, &'static str)> {
        let mut headers = vec![
            (self.brand, "Brand"),
            (self.model, "Model"),
            (self.spec, "Spec"),
            (self.quantity, "Qty"),
            (self.unit_price, "Unit Price"),
            (self.subtotal, "Subtotal"),
        ];
        headers.extend(
            [
                (self.unit_cost, "Unit Cost"),
                (self.subtotal_cost, "Cost Subtotal"),
                (self.supplier, "Supplier"),
            ]
            .into_iter()
            .filter_map(|(col, caption)| col.map(|col| (col, caption))),
        );
        headers.sort_by_key(|(col, _)| *col);
        headers
    }
}

/// Where the item table begins and which columns it uses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemBlock {
    pub start_row: u32,
    pub columns: ItemColumns,
}

impl ItemBlock {
    /// Sheet row for the item at `index` (positional, blanks included)
    pub fn row_for(&self, index: usize) -> QuoteResult<u32> {
        u32::try_from(index)
            .ok()
            .and_then(|offset| self.start_row.checked_add(offset))
            .filter(|row| *row <= MAX_ROW)
            .ok_or_else(|| {
                QuoteError::InvalidData(format!(
                    "Item #{} would land past the last sheet row {}",
                    index + 1,
                    MAX_ROW
                ))
            })
    }
}

/// Aggregate cells (cost & margin layouts)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TotalsCells {
    pub total_price: CellRef,
    pub tax_amount: CellRef,
    pub grand_total: CellRef,
    pub total_cost: CellRef,
    pub total_profit: CellRef,
    pub profit_margin: CellRef,
}

impl TotalsCells {
    pub fn labels(&self) -> [(CellRef, &'static str); 6] {
        [
            (self.total_price, "Total"),
            (self.tax_amount, "Tax 5%"),
            (self.grand_total, "Grand Total"),
            (self.total_cost, "Total Cost"),
            (self.total_profit, "Profit"),
            (self.profit_margin, "Margin"),
        ]
    }
}

//==============================================================================
// Template Layout
//==============================================================================

/// Complete coordinate table for one template version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateLayout {
    pub name: String,
    pub version: u32,
    pub kind: LayoutKind,
    pub customer: CustomerCells,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salesperson: Option<SalespersonCells>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quotation_date: Option<CellRef>,
    pub items: ItemBlock,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub totals: Option<TotalsCells>,
}

fn cell(address: &str) -> CellRef {
    // Built-in addresses are literals known to be valid
    match CellRef::parse(address) {
        Ok(cell) => cell,
        Err(e) => unreachable!("built-in address {}: {}", address, e),
    }
}

fn col(letters: &str) -> ColumnRef {
    match ColumnRef::parse(letters) {
        Ok(col) => col,
        Err(e) => unreachable!("built-in column {}: {}", letters, e),
    }
}

impl TemplateLayout {
    /// The original order form: customer block B12–B20, items from row 21
    pub fn simple() -> Self {
        Self {
            name: "simple".to_string(),
            version: 1,
            kind: LayoutKind::Simple,
            customer: CustomerCells {
                name: Some(cell("B12")),
                department: Some(cell("B13")),
                contact_person: Some(cell("B14")),
                phone: Some(cell("B15")),
                mobile: Some(cell("B17")),
                address: Some(cell("B19")),
                email: Some(cell("B20")),
                ..Default::default()
            },
            salesperson: None,
            quotation_date: Some(cell("F45")),
            items: ItemBlock {
                start_row: 21,
                columns: ItemColumns {
                    brand: col("A"),
                    model: col("B"),
                    spec: col("C"),
                    quantity: col("D"),
                    unit_price: col("E"),
                    subtotal: col("F"),
                    unit_cost: None,
                    subtotal_cost: None,
                    supplier: None,
                },
            },
            totals: None,
        }
    }

    /// Quotation with internal cost columns, salesperson block and totals
    pub fn cost_margin() -> Self {
        Self {
            name: "cost-margin".to_string(),
            version: 2,
            kind: LayoutKind::CostMargin,
            customer: CustomerCells {
                name: Some(cell("B9")),
                department: Some(cell("B10")),
                contact_person: Some(cell("B11")),
                phone: Some(cell("B12")),
                fax: Some(cell("B13")),
                mobile: Some(cell("B14")),
                tax_id: Some(cell("B15")),
                address: Some(cell("B16")),
                email: Some(cell("B17")),
            },
            salesperson: Some(SalespersonCells {
                name: cell("B38"),
                mobile: cell("B39"),
                messaging_id: cell("B40"),
                email: cell("B41"),
            }),
            quotation_date: Some(cell("B42")),
            items: ItemBlock {
                start_row: 20,
                columns: ItemColumns {
                    brand: col("A"),
                    model: col("B"),
                    spec: col("C"),
                    quantity: col("D"),
                    unit_price: col("E"),
                    subtotal: col("F"),
                    unit_cost: Some(col("G")),
                    subtotal_cost: Some(col("H")),
                    supplier: Some(col("I")),
                },
            },
            totals: Some(TotalsCells {
                total_price: cell("F29"),
                tax_amount: cell("F30"),
                grand_total: cell("F31"),
                total_cost: cell("H29"),
                total_profit: cell("H30"),
                profit_margin: cell("H31"),
            }),
        }
    }

    /// Look up a built-in layout by name
    pub fn builtin(name: &str) -> QuoteResult<Self> {
        match name.trim().to_lowercase().as_str() {
            "simple" => Ok(Self::simple()),
            "cost-margin" | "cost_margin" => Ok(Self::cost_margin()),
            other => Err(QuoteError::Layout(format!(
                "Unknown built-in layout '{}'. Available: {}",
                other,
                BUILTIN_LAYOUTS.join(", ")
            ))),
        }
    }

    /// A built-in name, or else a path to a YAML layout file
    pub fn resolve(name_or_path: &str) -> QuoteResult<Self> {
        if let Ok(layout) = Self::builtin(name_or_path) {
            return Ok(layout);
        }

        let path = Path::new(name_or_path);
        if path.exists() {
            return Self::from_file(path);
        }

        Err(QuoteError::Layout(format!(
            "'{}' is neither a built-in layout ({}) nor a layout file",
            name_or_path,
            BUILTIN_LAYOUTS.join(", ")
        )))
    }

    pub fn from_file(path: &Path) -> QuoteResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content).map_err(|e| match e {
            QuoteError::Layout(msg) => {
                QuoteError::Layout(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    pub fn from_yaml_str(content: &str) -> QuoteResult<Self> {
        let layout: Self = serde_yaml::from_str(content)
            .map_err(|e| QuoteError::Layout(format!("Invalid layout YAML: {}", e)))?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn to_yaml(&self) -> QuoteResult<String> {
        serde_yaml::to_string(self)
            .map_err(|e| QuoteError::Layout(format!("Failed to serialize layout: {}", e)))
    }

    /// Check that the blocks match the layout kind
    pub fn validate(&self) -> QuoteResult<()> {
        if self.version == 0 {
            return Err(QuoteError::Layout(format!(
                "Layout '{}' must have a version of 1 or higher",
                self.name
            )));
        }
        if self.items.start_row == 0 || self.items.start_row > MAX_ROW {
            return Err(QuoteError::Layout(format!(
                "Layout '{}': items.start_row {} outside 1..={}",
                self.name, self.items.start_row, MAX_ROW
            )));
        }

        let columns = &self.items.columns;
        match self.kind {
            LayoutKind::Simple => {
                let extra = [
                    ("items.columns.unit_cost", columns.unit_cost.is_some()),
                    ("items.columns.subtotal_cost", columns.subtotal_cost.is_some()),
                    ("items.columns.supplier", columns.supplier.is_some()),
                    ("salesperson", self.salesperson.is_some()),
                    ("totals", self.totals.is_some()),
                ];
                if let Some((block, _)) = extra.iter().find(|(_, present)| *present) {
                    return Err(QuoteError::Layout(format!(
                        "Layout '{}': '{}' is only used by cost_margin layouts",
                        self.name, block
                    )));
                }
            }
            LayoutKind::CostMargin => {
                let required = [
                    ("items.columns.unit_cost", columns.unit_cost.is_none()),
                    ("items.columns.subtotal_cost", columns.subtotal_cost.is_none()),
                    ("items.columns.supplier", columns.supplier.is_none()),
                    ("totals", self.totals.is_none()),
                ];
                if let Some((block, _)) = required.iter().find(|(_, missing)| *missing) {
                    return Err(QuoteError::Layout(format!(
                        "Layout '{}': cost_margin layouts require '{}'",
                        self.name, block
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letters() {
        assert_eq!(ColumnRef::parse("A").unwrap().index(), 1);
        assert_eq!(ColumnRef::parse("z").unwrap().index(), 26);
        assert_eq!(ColumnRef::parse("AA").unwrap().index(), 27);
        assert_eq!(ColumnRef::parse("XFD").unwrap().index(), MAX_COLUMN);
        assert_eq!(ColumnRef::new(28).unwrap().letters(), "AB");
        assert_eq!(ColumnRef::new(702).unwrap().letters(), "ZZ");
        assert_eq!(ColumnRef::new(703).unwrap().letters(), "AAA");
    }

    #[test]
    fn test_column_out_of_range() {
        assert!(ColumnRef::parse("XFE").is_err());
        assert!(ColumnRef::parse("ABCD").is_err());
        assert!(ColumnRef::parse("").is_err());
        assert!(ColumnRef::parse("A1").is_err());
        assert!(ColumnRef::new(0).is_err());
    }

    #[test]
    fn test_cell_parse() {
        let b12 = CellRef::parse("B12").unwrap();
        assert_eq!(b12.coordinate(), (2, 12));
        assert_eq!(b12.zero_based(), (11, 1));
        assert_eq!(b12.to_string(), "B12");

        assert_eq!(CellRef::parse("$H$31").unwrap().to_string(), "H31");
        assert_eq!(CellRef::parse(" f29 ").unwrap().to_string(), "F29");
    }

    #[test]
    fn test_cell_parse_rejects_out_of_sheet() {
        assert!(CellRef::parse("A0").is_err());
        assert!(CellRef::parse("A1048577").is_err());
        assert!(CellRef::parse("XFE1").is_err());
        assert!(CellRef::parse("A99999999999").is_err());
        assert!(CellRef::parse("12B").is_err());
        assert!(CellRef::parse("B").is_err());
    }

    #[test]
    fn test_cell_pattern_compiled_once() {
        assert!(std::ptr::eq(cell_address_pattern(), cell_address_pattern()));
        assert!(cell_address_pattern().is_match("$AA$10"));
        assert!(!cell_address_pattern().is_match("A-1"));
    }

    #[test]
    fn test_cell_left() {
        assert_eq!(CellRef::parse("B12").unwrap().left(), Some(cell("A12")));
        assert_eq!(CellRef::parse("A12").unwrap().left(), None);
    }

    #[test]
    fn test_simple_layout_has_eight_header_cells() {
        let layout = TemplateLayout::simple();
        let customer = CustomerInfo::default();
        let fields = layout.customer.fields(&customer);
        assert_eq!(fields.len() + layout.quotation_date.iter().count(), 8);
        assert_eq!(fields[0], ("name", cell("B12"), ""));
        assert_eq!(fields[6].1, cell("B20"));
    }

    #[test]
    fn test_cost_margin_customer_rows_9_to_17() {
        let layout = TemplateLayout::cost_margin();
        let rows: Vec<u32> = layout
            .customer
            .fields(&CustomerInfo::default())
            .iter()
            .map(|(_, cell, _)| cell.row)
            .collect();
        assert_eq!(rows, (9..=17).collect::<Vec<_>>());
    }

    #[test]
    fn test_builtins_validate() {
        TemplateLayout::simple().validate().unwrap();
        TemplateLayout::cost_margin().validate().unwrap();
    }

    #[test]
    fn test_builtin_lookup() {
        assert_eq!(TemplateLayout::builtin("simple").unwrap().kind, LayoutKind::Simple);
        assert_eq!(
            TemplateLayout::builtin("Cost_Margin").unwrap().kind,
            LayoutKind::CostMargin
        );
        assert!(matches!(
            TemplateLayout::builtin("fancy"),
            Err(QuoteError::Layout(_))
        ));
    }

    #[test]
    fn test_yaml_round_trip_preserves_builtins() {
        for layout in [TemplateLayout::simple(), TemplateLayout::cost_margin()] {
            let yaml = layout.to_yaml().unwrap();
            let parsed = TemplateLayout::from_yaml_str(&yaml).unwrap();
            assert_eq!(parsed, layout);
        }
    }

    #[test]
    fn test_row_for_is_positional() {
        let block = TemplateLayout::simple().items;
        assert_eq!(block.row_for(0).unwrap(), 21);
        assert_eq!(block.row_for(3).unwrap(), 24);
        assert!(matches!(
            block.row_for(MAX_ROW as usize),
            Err(QuoteError::InvalidData(_))
        ));
    }

    #[test]
    fn test_headers_sorted_by_column() {
        let headers = TemplateLayout::cost_margin().items.columns.headers();
        let captions: Vec<&str> = headers.iter().map(|(_, c)| *c).collect();
        assert_eq!(
            captions,
            vec![
                "Brand",
                "Model",
                "Spec",
                "Qty",
                "Unit Price",
                "Subtotal",
                "Unit Cost",
                "Cost Subtotal",
                "Supplier"
            ]
        );
    }
}
