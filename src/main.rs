use clap::{Parser, Subcommand};
use quoteforge::cli;
use quoteforge::error::QuoteResult;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quoteforge")]
#[command(about = "Fill quotation spreadsheet templates from order files.")]
#[command(long_about = "Quoteforge - Quotation spreadsheets from order data
Writes customer, salesperson and line items into fixed cells of an .xlsx template

COMMANDS:
  render    - Fill a template from an order file
  layout    - Print a built-in layout as YAML
  template  - Generate a starter template for a layout
  inspect   - Read a rendered quotation back

LAYOUTS:
  simple       - Customer block B12-B20, items from row 21 (A-F)
  cost-margin  - Customer B9-B17, items from row 20 (A-I),
                 salesperson B38-B41, date B42, totals F29-F31 / H29-H31

EXAMPLES:
  quoteforge render order.yaml                          # template.xlsx, simple layout
  quoteforge render order.yaml -t quote.xlsx -l cost-margin -o out/
  quoteforge layout cost-margin > my_layout.yaml        # customize, then -l my_layout.yaml")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Fill a quotation template from a YAML order file.

The template's active sheet is filled at the layout's fixed coordinates:
customer fields, salesperson fields, quotation date, one row per line item,
and (cost-margin layouts) the totals block.

ROW POLICY:
  simple       - Rows with neither brand nor model are skipped,
                 but still consume their row number
  cost-margin  - Every row is written; missing numbers count as 0

OUTPUT:
  Defaults to quotation_<customer>_<today>.xlsx in the current directory.
  If --output is a directory the generated name is used inside it.
  Nothing is written when rendering fails.")]
    /// Fill a template from an order file
    Render {
        /// Path to YAML order file (customer, salesperson, items)
        order: PathBuf,

        /// Template workbook (.xlsx)
        #[arg(short, long, env = "QUOTEFORGE_TEMPLATE")]
        template: Option<PathBuf>,

        /// Built-in layout name or path to a layout YAML file
        #[arg(short, long, default_value = "simple", env = "QUOTEFORGE_LAYOUT")]
        layout: String,

        /// Output file or directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show verbose rendering steps
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print a built-in layout as YAML
    Layout {
        /// Layout name (simple, cost-margin)
        name: String,
    },

    #[command(long_about = "Generate a starter template for a layout.

Writes captions next to every value cell, a header row above the item
table, and =qty*price formulas in the subtotal columns. Style it in Excel
as needed; only the value cells' positions matter.")]
    /// Generate a starter template for a layout
    Template {
        /// Output template path (.xlsx)
        output: PathBuf,

        /// Built-in layout name or path to a layout YAML file
        #[arg(short, long, default_value = "simple")]
        layout: String,

        /// Leave subtotal columns empty instead of pre-filling formulas
        #[arg(long)]
        no_formulas: bool,
    },

    /// Read a rendered quotation back through a layout
    Inspect {
        /// Rendered quotation (.xlsx)
        file: PathBuf,

        /// Built-in layout name or path to a layout YAML file
        #[arg(short, long, default_value = "simple")]
        layout: String,
    },
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "quoteforge=debug" } else { "quoteforge=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> QuoteResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            order,
            template,
            layout,
            output,
            verbose,
        } => {
            init_tracing(verbose);
            cli::render(order, template, layout, output, verbose)
        }

        Commands::Layout { name } => cli::layout(name),

        Commands::Template {
            output,
            layout,
            no_formulas,
        } => cli::template(output, layout, no_formulas),

        Commands::Inspect { file, layout } => cli::inspect(file, layout),
    }
}
