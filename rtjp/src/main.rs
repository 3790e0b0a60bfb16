use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use rtjp::Error;
use rtjp::config::Config;
use rtjp::ojp::{MockOjpClient, OjpClient};
use rtjp::run::{query_and_report, report_saved};
use rtjp::store::ResponseStore;

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

/// Fares and service bulletins for a day's rail journey.
#[derive(Parser, Debug)]
#[command(name = "rtjp", version, about)]
struct Args {
    /// Log the outgoing request and other diagnostics
    #[arg(short, long)]
    debug: bool,

    /// Report on the response saved for DATE instead of querying
    #[arg(short, long, value_name = "DATE", value_parser = parse_date)]
    input: Option<NaiveDate>,

    /// Query the journey planner for DATE, report, and save the response
    #[arg(short, long, value_name = "DATE", value_parser = parse_date)]
    query: Option<NaiveDate>,

    /// Answer queries from canned `{DATE}.xml` responses in DIR
    #[arg(long, value_name = "DIR")]
    mock_dir: Option<PathBuf>,
}

fn init_tracing(debug: bool) {
    let default = if debug { "rtjp=debug" } else { "rtjp=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // Diagnostics join the report on stdout only when asked for.
    let (writer, ansi) = if debug {
        (
            BoxMakeWriter::new(std::io::stdout),
            std::io::stdout().is_terminal(),
        )
    } else {
        (
            BoxMakeWriter::new(std::io::stderr),
            std::io::stderr().is_terminal(),
        )
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .init();
}

async fn run(args: Args) -> Result<(), Error> {
    let config = Config::new();
    let store = ResponseStore::new(&config.store_dir);
    let mut stdout = std::io::stdout();

    if let Some(date) = args.input {
        report_saved(&config, &store, date, &mut stdout)?;
    }

    if let Some(date) = args.query {
        match &args.mock_dir {
            Some(dir) => {
                let planner = MockOjpClient::new(dir)?;
                query_and_report(&config, &planner, &store, date, &mut stdout).await?;
            }
            None => {
                let service = config.service.clone().with_credentials_from_env();
                let planner = OjpClient::new(service)?;
                query_and_report(&config, &planner, &store, date, &mut stdout).await?;
            }
        }
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.debug);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("rtjp: {e}");
            ExitCode::FAILURE
        }
    }
}
