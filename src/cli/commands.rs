use crate::error::QuoteResult;
use crate::excel::{
    InspectedQuotation, QuotationInspector, QuotationRenderer, TemplateGenerator, TemplateSource,
    DEFAULT_TEMPLATE,
};
use crate::layout::{LayoutKind, TemplateLayout};
use crate::parser;
use crate::types::QuotationTotals;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// Format a number for display, removing unnecessary decimal places
fn format_number(n: f64) -> String {
    // Money never needs more than 2 decimals on screen
    let rounded = (n * 100.0).round() / 100.0;
    let formatted = format!("{:.2}", rounded)
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string();
    if formatted == "-0" {
        "0".to_string()
    } else {
        formatted
    }
}

/// Format a ratio as a percentage with one decimal
fn format_percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

/// Where the rendered workbook goes: explicit file, into a directory, or cwd
fn output_path(output: Option<PathBuf>, file_name: &str) -> PathBuf {
    match output {
        Some(path) if path.is_dir() => path.join(file_name),
        Some(path) => path,
        None => PathBuf::from(file_name),
    }
}

fn print_totals(totals: &QuotationTotals, kind: LayoutKind) {
    println!("{}", "💰 Totals:".bold().cyan());
    println!("   Total:       {}", format_number(totals.total_price).bold());
    if kind == LayoutKind::CostMargin {
        println!("   Tax (5%):    {}", format_number(totals.tax_amount));
        println!(
            "   Grand total: {}",
            format_number(totals.grand_total).bold().green()
        );
        println!("{}", "🔒 Internal:".bold().cyan());
        println!("   Cost:        {}", format_number(totals.total_cost));
        println!("   Profit:      {}", format_number(totals.total_profit));
        println!("   Margin:      {}", format_percent(totals.profit_margin));
    }
    println!();
}

/// Execute the render command
pub fn render(
    order: PathBuf,
    template: Option<PathBuf>,
    layout: String,
    output: Option<PathBuf>,
    verbose: bool,
) -> QuoteResult<()> {
    let template = template.unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE));

    println!("{}", "🧾 Quoteforge - Rendering quotation".bold().green());
    println!("   Order:    {}", order.display());
    println!("   Template: {}", template.display());
    println!("   Layout:   {}\n", layout.bright_yellow());

    let layout = TemplateLayout::resolve(&layout)?;
    let kind = layout.kind;

    if verbose {
        println!("{}", "📖 Parsing order file...".cyan());
    }

    let quotation = parser::parse_quotation(&order)?;

    if verbose {
        let blank = quotation.items.iter().filter(|item| item.is_blank()).count();
        println!("   Customer: {}", quotation.customer.name.bright_blue());
        println!(
            "   Found {} items ({} blank)\n",
            quotation.items.len(),
            blank
        );
        println!("{}", "📊 Filling template...".cyan());
    }

    let renderer = QuotationRenderer::new(layout);
    let rendered = renderer.render(&TemplateSource::Path(template), &quotation)?;

    let output = output_path(output, &rendered.file_name);
    if !is_xlsx(&output) {
        println!("{}", "⚠️  Output name does not end in .xlsx".yellow());
    }
    fs::write(&output, &rendered.bytes)?;

    if verbose {
        println!(
            "   Wrote {} item rows, {} bytes\n",
            rendered.rows_written,
            rendered.bytes.len()
        );
    }

    print_totals(&rendered.totals, kind);

    println!("{}", "✅ Quotation ready!".bold().green());
    println!("   Excel file: {}\n", output.display());

    Ok(())
}

/// Execute the layout command - print a built-in layout as YAML
pub fn layout(name: String) -> QuoteResult<()> {
    let layout = TemplateLayout::builtin(&name)?;
    print!("{}", layout.to_yaml()?);
    Ok(())
}

/// Execute the template command - generate a starter template
pub fn template(output: PathBuf, layout: String, no_formulas: bool) -> QuoteResult<()> {
    println!("{}", "🧾 Quoteforge - Starter Template".bold().green());
    println!("   Layout: {}", layout.bright_yellow());
    println!("   Output: {}\n", output.display());

    if !is_xlsx(&output) {
        println!("{}", "⚠️  Output name does not end in .xlsx\n".yellow());
    }

    let layout = TemplateLayout::resolve(&layout)?;
    let mut generator = TemplateGenerator::new(layout);
    if no_formulas {
        generator = generator.without_formulas();
    }
    generator.generate(&output)?;

    println!("{}", "✅ Template created!".bold().green());
    println!("   Style it in Excel; keep the value cells where the layout expects them.\n");

    Ok(())
}

/// Execute the inspect command - read a rendered quotation back
pub fn inspect(file: PathBuf, layout: String) -> QuoteResult<()> {
    println!("{}", "🔍 Quoteforge - Inspect".bold().green());
    println!("   File:   {}", file.display());
    println!("   Layout: {}\n", layout.bright_yellow());

    let layout = TemplateLayout::resolve(&layout)?;
    let inspected = QuotationInspector::open(&file)?.inspect(&layout)?;

    print_inspection(&inspected, layout.kind);
    Ok(())
}

fn print_inspection(inspected: &InspectedQuotation, kind: LayoutKind) {
    println!("{}", "📋 Header:".bold().cyan());
    for (label, value) in &inspected.fields {
        println!("   {:<14} {}", format!("{}:", label), value);
    }
    println!();

    println!("{}", "📦 Items:".bold().cyan());
    if inspected.rows.is_empty() {
        println!("   (none)");
    }
    for row in &inspected.rows {
        println!(
            "   row {:>3}  {} {}  {} × {} = {}",
            row.row,
            row.brand.bright_blue(),
            row.model,
            format_number(row.quantity),
            format_number(row.unit_price),
            format_number(row.subtotal).bold()
        );
    }
    println!();

    if let Some(totals) = &inspected.totals {
        print_totals(totals, kind);
    }
}

/// True if `path` looks like an .xlsx file name
fn is_xlsx(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"))
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
