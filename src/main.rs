use std::fs::File;
use std::io::{self, BufReader};
use std::process::ExitCode;

use clap::Parser;
use listwatch::cli::{Cli, Command, DiffArgs, RunArgs, ShowArgs};
use listwatch::config::Config;
use listwatch::error::{Error, Result};
use listwatch::listing::FieldLists;
use listwatch::logging;
use listwatch::report::{self, FileReport, ReportSink, Summary};
use listwatch::run::run_cycle;
use listwatch::store::diff::compare_listings_with;
use listwatch::store::snapshot::CsvStore;
use listwatch::store::SnapshotStore;

fn read_fields(args: &RunArgs) -> Result<FieldLists> {
    if args.fields_from_stdin() {
        return Ok(serde_json::from_reader(io::stdin().lock())?);
    }

    let file = File::open(&args.fields).map_err(|e| Error::io(&args.fields, e))?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

fn now() -> chrono::NaiveDateTime {
    chrono::Local::now().naive_local()
}

fn run(args: &RunArgs) -> Result<()> {
    let config = Config::from_run_args(args)?;
    let fields = read_fields(args)?;

    let mut store = CsvStore::new(&config.snapshot_path);
    let mut sink = FileReport::new(&config.report_path);
    let timestamp = now();

    let outcome = run_cycle(
        &mut store,
        &mut sink,
        &fields,
        config.match_policy,
        timestamp,
    )?;

    if config.json_output {
        println!(
            "{}",
            report::json::render_changes(&outcome.summary, &outcome.changes, timestamp)?
        );
    } else {
        println!("{}", report::run_message(&outcome.summary, &sink.location()));
    }

    Ok(())
}

fn show(args: &ShowArgs) -> Result<()> {
    let config = Config::from_show_args(args)?;
    let listings = CsvStore::new(&config.snapshot_path).load();

    if config.json_output {
        println!("{}", report::json::render_listings(&listings)?);
    } else {
        print!("{}", report::table::render(&listings));
    }

    Ok(())
}

fn diff(args: &DiffArgs) -> Result<()> {
    let config = Config::from_diff_args(args)?;

    let from = CsvStore::new(&args.from).load();
    let to = CsvStore::new(&args.to).load();

    let changes = compare_listings_with(&from, &to, config.match_policy);
    let summary = Summary::new(to.len(), &changes);
    let timestamp = now();

    if config.json_output {
        println!(
            "{}",
            report::json::render_changes(&summary, &changes, timestamp)?
        );
        return Ok(());
    }

    print!(
        "{}",
        report::text::render_comparison(&changes, &summary, timestamp)
    );

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.command.common().verbose);

    let result = match &cli.command {
        Command::Run(args) => run(args),
        Command::Show(args) => show(args),
        Command::Diff(args) => diff(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
