//! Quoteforge API Server binary
//!
//! HTTP REST API that renders quotation templates and returns the .xlsx.

use clap::Parser;
use quoteforge::api::{run_api_server, server::ApiConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "quoteforge-server")]
#[command(version)]
#[command(about = "Quoteforge API Server - render quotation spreadsheets over HTTP")]
#[command(long_about = r#"
Quoteforge API Server

Endpoints:
  - POST /api/v1/render         - Render from JSON (server-side template)
  - POST /api/v1/render/upload  - Render with an uploaded template (multipart)
  - GET  /api/v1/layouts/:name  - Built-in layout as JSON

Additional endpoints:
  - GET  /health                - Health check
  - GET  /version               - Server version info
  - GET  /                      - API documentation

Successful renders return the workbook with
Content-Type: application/vnd.openxmlformats-officedocument.spreadsheetml.sheet
and Content-Disposition naming quotation_<customer>_<date>.xlsx.

Example usage:
  quoteforge-server                              # localhost:8080, ./template.xlsx
  quoteforge-server --port 3000 --template quote.xlsx

  curl -X POST http://localhost:8080/api/v1/render \
    -H "Content-Type: application/json" \
    -d '{"layout": "simple", "quotation": {"customer": {"name": "Cadex"},
         "items": [{"brand": "DELL", "model": "T2", "quantity": 1, "unit_price": 83880}]}}' \
    -OJ
"#)]
struct Args {
    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "QUOTEFORGE_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "QUOTEFORGE_PORT")]
    port: u16,

    /// Template used when a request supplies none
    #[arg(short, long, default_value = "template.xlsx", env = "QUOTEFORGE_TEMPLATE")]
    template: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ApiConfig {
        host: args.host,
        port: args.port,
        default_template: args.template,
    };

    run_api_server(config).await
}
