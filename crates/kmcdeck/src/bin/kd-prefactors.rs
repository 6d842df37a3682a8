use std::io::Write;

use colored::*;
use env_logger::Builder;
use clap::Parser;
use clap::ArgAction;
use anyhow::Result;
use anyhow::bail;

use kmcdeck::SimulationSettings;
use kmcdeck::serializer::sci3;
use kmcdeck::input_parsers::read_deck_input;
use kmcdeck::job_parsers::RateModelArguments;

#[derive(Debug, Parser)]
#[command(name = "kd-prefactors")]
#[command(version, about = "Print TST pre-exponential factors of a reaction mechanism")]
pub struct Cli {
    /// Deck input file (JSON), or "-" for stdin
    #[arg(value_name = "INPUT", default_value = "-")]
    input: String,

    /// Temperature in Kelvin.
    #[arg(short, long, default_value_t = 300.0)]
    temperature: f64,

    /// Verbosity (-v = info, -vv = debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(flatten, next_help_heading = "Rate model parameters")]
    rates: RateModelArguments,
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| {
            writeln!(buf, "{}", record.args())
        })
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if !(cli.temperature > 0.0) {
        bail!("temperature must be positive (got {})", cli.temperature);
    }

    let settings = SimulationSettings { temperature: cli.temperature, ..Default::default() };
    let deck = read_deck_input(&cli.input)?.into_deck(settings)?;
    let model = cli.rates.build_model();
    let options = cli.rates.mechanism_options();
    options.check(&deck);

    let width = deck.steps().names().map(str::len).max().unwrap_or(4).max(4);
    println!("{}", format!("T = {} K", deck.temperature()).yellow());
    let header = format!("{:<width$}  {:<24}  {:>10}  {:>10}  {:>10}",
        "step", "type", "pe_fwd", "pe_rev", "pe_ratio");
    println!("{}", header.bold());

    for row in deck.rate_table(&model, &options)? {
        let note = match row.scaling {
            Some(s) => format!("  x{}", sci3(s.multiplier())).magenta().to_string(),
            None => String::new(),
        };
        println!("{:<width$}  {}  {}  {}  {:>10}{}",
            row.name,
            format!("{:<24}", row.kind.to_string()).cyan(),
            format!("{:>10}", sci3(row.rates.forward)).green(),
            format!("{:>10}", sci3(row.rates.reverse)).green(),
            sci3(row.rates.ratio()),
            note);
    }
    Ok(())
}
