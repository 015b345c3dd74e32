//! devreport CLI - Parse device provisioning files
//!
//! ```bash
//! devreport parse devices.txt              # Parse and print JSON
//! devreport parse devices.txt -f xml       # Parse and print XML
//! devreport check devices.txt              # Validate and summarize
//! devreport serve                          # Start HTTP server (port 3000)
//! ```

use clap::{Parser, Subcommand};
use devreport::{parse_report_file, render, OutputFormat};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "devreport")]
#[command(about = "Parse pipe-delimited device provisioning files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a report file and output JSON or XML
    Parse {
        /// Input report file
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a report file and print a summary
    Check {
        /// Input report file
        input: PathBuf,
    },

    /// Start HTTP server
    Serve {
        /// Port to listen on (default: $DEVREPORT_PORT, then 3000)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse {
            input,
            format,
            output,
        } => cmd_parse(&input, format, output.as_deref()),

        Commands::Check { input } => cmd_check(&input),

        Commands::Serve { port } => cmd_serve(port).await,
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_parse(
    input: &Path,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Parsing report: {}", input.display());

    let parsed = parse_report_file(input)?;
    eprintln!("   Encoding: {}", parsed.encoding);
    eprintln!("   Server:   {}", parsed.report.server_id);
    eprintln!("✅ Parsed {} devices", parsed.report.record_count);

    let rendered = render(&parsed.report, format)?;
    write_output(&rendered, output)?;

    Ok(())
}

fn cmd_check(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("✔️  Checking: {}", input.display());

    let parsed = parse_report_file(input)?;
    let report = parsed.report;

    eprintln!("   Encoding: {}", parsed.encoding);
    println!("Server ID: {}", report.server_id);
    println!("Devices:   {}", report.record_count);
    for line in &report.device_lines {
        println!(
            "  - {} (IMEI {} / {}, serial {})",
            line.device_name, line.imei1, line.imei2, line.serial_number
        );
    }

    eprintln!("✅ Report OK");
    Ok(())
}

async fn cmd_serve(port: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let port = port
        .or_else(|| {
            std::env::var("DEVREPORT_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
        })
        .unwrap_or(3000);

    devreport::server::start_server(port).await
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
