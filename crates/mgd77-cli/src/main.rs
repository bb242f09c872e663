//! MGD77 command-line tool.

use std::io::{self, IsTerminal, Write};

use anyhow::Result;
use clap::{ColorChoice, Parser};
use mgd77_cli::commands::{
    ListOptions, VerifyOptions, run_convert, run_info, run_list, run_path, run_verify,
};
use mgd77_cli::logging::{LogDestination, LogSettings, LogStyle, init_logging};
use mgd77_cli::summary::{header_table, verification_table};
use mgd77_io::{Format, Mgd77Home};
use mgd77_verify::Verbosity;
use tracing::level_filters::LevelFilter;

mod cli;

use crate::cli::{
    Cli, Command, ConvertArgs, FormatArg, InfoArgs, ListArgs, LogFormatArg, LogLevelArg,
    VerifyArgs,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    if let Err(error) = init_logging(&log_settings(&cli)) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let home = cli.home.clone().map_or_else(Mgd77Home::from_env, Mgd77Home::new);
    let outcome = match &cli.command {
        Command::Info(args) => info(&home, args).map(|()| 0),
        Command::Convert(args) => convert(&home, args).map(|()| 0),
        Command::List(args) => list(&home, args).map(|()| 0),
        Command::Verify(args) => verify(&home, args),
        Command::Path(args) => run_path(&home, &args.cruises).map(|paths| {
            for (path, _) in paths {
                println!("{}", path.display());
            }
            0
        }),
    };
    let exit_code = outcome.unwrap_or_else(|error| {
        eprintln!("error: {error:#}");
        1
    });
    std::process::exit(exit_code);
}

fn info(home: &Mgd77Home, args: &InfoArgs) -> Result<()> {
    let header = run_info(home, &args.cruise, args.original, &args.items)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&header.to_json())?);
        return Ok(());
    }
    println!("Cruise: {}", header.cruise);
    println!("File: {} ({})", header.path.display(), header.format);
    println!("Records: {}", header.header.n_records);
    let params = header.header.params(header.param_set);
    println!("{}", header_table(params, header.items.as_deref()));
    Ok(())
}

fn convert(home: &Mgd77Home, args: &ConvertArgs) -> Result<()> {
    let to = match args.to {
        FormatArg::M77 => Format::M77,
        FormatArg::M77t => Format::M77t,
        FormatArg::Dat => Format::Tbl,
        FormatArg::Nc => Format::Cdf,
    };
    for path in run_convert(home, &args.cruises, to, args.out.as_deref())? {
        println!("{}", path.display());
    }
    Ok(())
}

fn list(home: &Mgd77Home, args: &ListArgs) -> Result<()> {
    let options = ListOptions {
        columns: args.fields.clone(),
        corrections: args.corrections.clone(),
        fake_times: args.fake_times,
        no_adjust: args.no_adjust,
        with_names: args.header,
    };
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    for cruise in &args.cruises {
        run_list(home, cruise, &options, &mut out)?;
    }
    out.flush()?;
    Ok(())
}

fn verify(home: &Mgd77Home, args: &VerifyArgs) -> Result<i32> {
    let options = VerifyOptions {
        original: args.original,
        verbosity: Verbosity {
            warnings: !args.no_warnings,
            errors: true,
        },
        progress: io::stderr().is_terminal(),
    };
    let reports = run_verify(home, &args.cruises, options)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print!("{}", report.render_text());
        }
        if reports.len() > 1 {
            println!("{}", verification_table(&reports));
        }
    }
    Ok(i32::from(reports.iter().any(|r| r.has_errors())))
}

/// Logging settings from the global flags. `--log-level` beats `-v`/`-q`,
/// and either beats `RUST_LOG`.
fn log_settings(cli: &Cli) -> LogSettings {
    let level = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
    let destination = cli
        .log_file
        .clone()
        .map_or(LogDestination::Stderr, LogDestination::File);
    LogSettings {
        level,
        honor_rust_log: !(cli.verbosity.is_present() || cli.log_level.is_some()),
        style: match cli.log_format {
            LogFormatArg::Pretty => LogStyle::Pretty,
            LogFormatArg::Compact => LogStyle::Compact,
            LogFormatArg::Json => LogStyle::Json,
        },
        color: match cli.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => destination == LogDestination::Stderr && io::stderr().is_terminal(),
        },
        destination,
    }
}
