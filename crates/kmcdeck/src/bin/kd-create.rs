use std::io::Write;
use std::path::PathBuf;

use log::info;
use colored::*;
use env_logger::Builder;
use clap::Parser;
use clap::ArgAction;
use anyhow::Result;
use anyhow::bail;
use rayon::prelude::*;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;

use kmcdeck::KmcJob;
use kmcdeck::JobStatus;
use kmcdeck::LatticeModel;
use kmcdeck::input_parsers::read_deck_input;
use kmcdeck::job_parsers::RateModelArguments;
use kmcdeck::job_parsers::SimulationArguments;

#[derive(Debug, Parser)]
#[command(name = "kd-create")]
#[command(version, about = "Write Zacros job directories with TST pre-exponential factors")]
pub struct Cli {
    /// Deck input file (JSON), or "-" for stdin
    #[arg(value_name = "INPUT", default_value = "-")]
    input: String,

    /// Existing lattice_input.dat copied into every job.
    #[arg(short, long, value_name = "FILE")]
    lattice: PathBuf,

    /// Directory the job directories are created in.
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    output: PathBuf,

    /// Job name; each job directory is called NAME_<T>K.
    #[arg(short, long, default_value = "kmc")]
    name: String,

    /// Overwrite the lattice repeat_cell with A B.
    #[arg(long, num_args = 2, value_names = ["A", "B"])]
    repeat_cell: Option<Vec<u32>>,

    /// Verbosity (-v = info, -vv = debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(flatten, next_help_heading = "Simulation parameters")]
    simulation: SimulationArguments,

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
    cli.simulation.validate()?;

    let input = read_deck_input(&cli.input)?;
    let mut lattice = LatticeModel::from_file(&cli.lattice)?;
    if let Some(size) = &cli.repeat_cell {
        let &[a, b] = size.as_slice() else {
            bail!("--repeat-cell takes exactly two values");
        };
        lattice.update_size([a, b]);
    }
    let model = cli.rates.build_model();
    let options = cli.rates.mechanism_options();
    std::fs::create_dir_all(&cli.output)?;

    let temperatures = &cli.simulation.temperatures;
    info!("Creating {} job(s) in {}", temperatures.len(), cli.output.display());

    let pb = ProgressBar::new(temperatures.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
        .progress_chars("#>-"),
    );

    let results: Vec<(PathBuf, Result<JobStatus>)> = temperatures
        .par_iter()
        .map_init(
            || pb.clone(),
            |pb, &t| {
                let path = cli.output.join(format!("{}_{}K", cli.name, t));
                let status = input.clone()
                    .into_deck(cli.simulation.settings(t))
                    .and_then(|deck| {
                        options.check(&deck);
                        KmcJob::new(deck, lattice.clone(), model, options.clone()).create(&path)
                    })
                    .map_err(anyhow::Error::from);
                pb.inc(1);
                (path, status)
            },
        ).collect();
    pb.finish_and_clear();

    let mut failed = 0;
    for (path, status) in results {
        match status {
            Ok(JobStatus::Created) => println!("{} {}", "created".green(), path.display()),
            Ok(JobStatus::AlreadyExists) => println!("{} {}", "exists ".yellow(), path.display()),
            Err(e) => {
                failed += 1;
                eprintln!("{} {}: {}", "failed ".red(), path.display(), e);
            }
        }
    }
    if failed > 0 {
        bail!("{} of {} job(s) failed", failed, temperatures.len());
    }
    Ok(())
}
