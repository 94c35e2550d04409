use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use pesel_etl::utils::{logger, validation};
use pesel_etl::{BirthDate, RandomSequence};
use std::io::{self, BufRead, Write};

#[derive(Parser)]
#[command(name = "pesel-gen")]
#[command(about = "Generate random valid PESEL numbers for a birth date")]
struct Args {
    /// Birth date, e.g. 30-01-1819; asked for on stdin when omitted
    date: Option<String>,

    /// How many numbers to generate
    #[arg(short = 'n', long, default_value = "1")]
    count: usize,

    /// strftime format used to parse the birth date
    #[arg(long, default_value = "%d-%m-%Y")]
    input_format: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_logger(args.verbose, false, None);

    validation::validate_positive_number("count", args.count, 1)?;

    let raw = match args.date {
        Some(date) => date,
        None => prompt("Podaj datę urodzenia: ")?,
    };

    let date = NaiveDate::parse_from_str(raw.trim(), &args.input_format).with_context(|| {
        format!(
            "'{}' is not a date in format {}",
            raw.trim(),
            args.input_format
        )
    })?;
    let birth_date = BirthDate::from_naive_date(date)?;
    tracing::debug!("Generating {} PESEL number(s) for {}", args.count, birth_date);

    let mut source = RandomSequence::new();
    for _ in 0..args.count {
        println!("{}", birth_date.generate(&mut source));
    }

    Ok(())
}

fn prompt(message: &str) -> anyhow::Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "{}", message)?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read birth date from stdin")?;
    Ok(line)
}
