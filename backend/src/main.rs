//! RevFlow CLI - paid vs non-paid revenue attribution
//!
//! ```bash
//! revflow process export.csv            # Clean, classify, print charts, write cleaned_data.csv
//! revflow process export.csv --charts out   # Also write the pie charts as HTML
//! revflow serve                         # Start HTTP server (port 3000)
//! revflow classify "google / cpc" "(direct) / (none)"   # Debug one pair of cells
//! ```

use clap::{Parser, Subcommand};
use revflow::{
    allocate_row, classify, format_table, process_file, save_cleaned_csv, split_source_medium,
    ChartSlice, PaidKeywords, ReportCharts, ReportOptions, ReportOutcome, CLEANED_FILE_NAME,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "revflow")]
#[command(about = "Attribute analytics export revenue to paid and non-paid traffic", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean an export, print both charts and write the cleaned CSV
    Process {
        /// Input CSV export
        input: PathBuf,

        /// Cleaned CSV output
        #[arg(short, long, default_value = CLEANED_FILE_NAME)]
        output: PathBuf,

        /// Number of preview rows (default: 20, or REVFLOW_PREVIEW_ROWS)
        #[arg(long)]
        preview: Option<usize>,

        /// Comma separated paid keywords (default: cpc,paid,shopping,summersale)
        #[arg(short, long)]
        keywords: Option<String>,

        /// Print the report as JSON on stdout instead of tables
        #[arg(long)]
        json: bool,

        /// Directory to write the pie charts to as HTML pages
        #[arg(long)]
        charts: Option<PathBuf>,
    },

    /// Split and classify a pair of source / medium cells
    Classify {
        /// Session source / medium
        session: String,

        /// First user source / medium
        first_user: String,

        /// Comma separated paid keywords
        #[arg(short, long)]
        keywords: Option<String>,
    },

    /// Start HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Built web UI to serve on `/`
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Process {
            input,
            output,
            preview,
            keywords,
            json,
            charts,
        } => cmd_process(&input, &output, preview, keywords.as_deref(), json, charts.as_deref()),

        Commands::Classify {
            session,
            first_user,
            keywords,
        } => cmd_classify(&session, &first_user, keywords.as_deref()),

        Commands::Serve { port, static_dir } => cmd_serve(port, static_dir).await,
    };

    if let Err(e) = result {
        eprintln!("❌ Processing failed: {}", e);
        std::process::exit(1);
    }
}

fn build_options(preview: Option<usize>, keywords: Option<&str>) -> ReportOptions {
    let mut options = ReportOptions::from_env();
    if let Some(rows) = preview {
        options.preview_rows = rows;
    }
    if let Some(list) = keywords {
        options.paid_keywords = PaidKeywords::parse_list(list);
    }
    options
}

fn cmd_process(
    input: &Path,
    output: &Path,
    preview: Option<usize>,
    keywords: Option<&str>,
    json: bool,
    charts_dir: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = build_options(preview, keywords);
    let outcome = process_file(input, &options)?;

    save_cleaned_csv(output, &outcome.rows)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_report(&outcome);
    }

    eprintln!("\n💾 Cleaned data written to: {}", output.display());

    if let Some(dir) = charts_dir {
        for path in ReportCharts::from_outcome(&outcome).save_html(dir)? {
            eprintln!("📊 Chart written to: {}", path.display());
        }
    }
    eprintln!("✨ Done!");
    Ok(())
}

fn print_report(outcome: &ReportOutcome) {
    eprintln!("\n✅ Data cleaned successfully! Preview below:\n");
    let columns = revflow::report_columns();
    let rows: Vec<Vec<String>> = outcome.preview().iter().map(|r| r.to_cells()).collect();
    eprintln!("{}", format_table(&columns, &rows));

    eprintln!("\n📈 Revenue Distribution");
    print_chart("Paid vs Non-paid", &outcome.paid_split);

    match outcome.warning {
        Some(ref warning) => eprintln!("\n⚠️  {}", warning),
        None => print_chart("Paid revenue by ad channel", &outcome.channel_revenue),
    }
}

fn print_chart(title: &str, slices: &[ChartSlice]) {
    eprintln!("\n{}", title);
    let rows: Vec<Vec<String>> = slices
        .iter()
        .map(|s| vec![s.label.clone(), format!("{:.2}", s.value), format!("{:.1}%", s.percent)])
        .collect();
    eprintln!("{}", format_table(&["", "Revenue", "Share"], &rows));
}

fn cmd_classify(
    session: &str,
    first_user: &str,
    keywords: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = build_options(None, keywords);
    let kw = &options.paid_keywords;

    let sm1 = split_source_medium(session);
    let sm2 = split_source_medium(first_user);
    let status = classify(&sm1.medium, &sm2.medium, kw);

    println!("source1: {}", sm1.source);
    println!("medium1: {}", sm1.medium);
    println!("source2: {}", sm2.source);
    println!("medium2: {}", sm2.medium);
    println!("status:  {}", status);

    let row = revflow::ReportRow {
        channel_group: String::new(),
        session_source_medium: session.to_string(),
        first_user_source_medium: first_user.to_string(),
        sessions: String::new(),
        total_users: String::new(),
        add_to_carts: String::new(),
        checkouts: String::new(),
        purchases: String::new(),
        total_revenue: "100".to_string(),
        revenue: 100.0,
        source1: sm1.source,
        medium1: sm1.medium,
        source2: sm2.source,
        medium2: sm2.medium,
        paid_status: status,
    };
    for (source, share) in allocate_row(&row, kw) {
        println!("credit:  {} {:.0}%", source, share);
    }

    Ok(())
}

async fn cmd_serve(port: u16, static_dir: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let options = ReportOptions::from_env();
    revflow::server::start_server(port, options, static_dir).await
}
