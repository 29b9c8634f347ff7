use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nestegg_ingest::{parse_fidelity_statement, statement_date_from_path, Holding, StatementHeader};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "nestegg", version, about = "Brokerage statement import tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse statement exports and print the account header and holdings
    Parse {
        /// Statement CSVs, named Statement<MDDYYYY>.csv or Statement<MMDDYYYY>.csv
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Emit the parsed records as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Print the statement date encoded in each filename
    Date {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Parse { files, json } => {
            for file in files {
                let (header, holdings) = parse_fidelity_statement(&file)
                    .with_context(|| format!("parsing {}", file.display()))?;

                if json {
                    print_json(&header, &holdings)?;
                } else {
                    print_statement(&file, &header, &holdings);
                }
            }
        }

        Command::Date { files } => {
            for file in files {
                let date = statement_date_from_path(&file)
                    .with_context(|| format!("resolving date for {}", file.display()))?;
                println!("{}: {}", file.display(), date);
            }
        }
    }

    Ok(())
}

fn print_statement(file: &Path, header: &StatementHeader, holdings: &[Holding]) {
    println!(
        "{}: {} account {} as of {}",
        file.display(),
        header.account_type,
        header.account_id,
        header.statement_date,
    );
    println!(
        "  value ${:.2} -> ${:.2} ({:+.2}) | dividends ${:.2} | {} holdings",
        header.beginning_value,
        header.ending_value,
        header.period_change(),
        header.dividends,
        holdings.len(),
    );

    for h in holdings {
        println!(
            "  [{}] {} | qty {} @ ${:.2} | ${:.2} -> ${:.2} | basis ${:.2} | {}",
            h.kind.label(),
            h.ticker,
            h.quantity,
            h.price,
            h.beginning_value,
            h.ending_value,
            h.cost_basis,
            h.description,
        );
    }
}

fn print_json(header: &StatementHeader, holdings: &[Holding]) -> Result<()> {
    let doc = serde_json::json!({
        "header": header,
        "holdings": holdings,
    });
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}
