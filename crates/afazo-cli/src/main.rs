// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use afazo_app::AppState;
use afazo_db::Store;
use afazo_testkit::FakeTaskStore;
use afazo_tui::TerminalColorScheme;
use anyhow::{Context, Result};
use config::Config;
use runtime::TaskRuntime;
use std::env;
use std::path::PathBuf;
use tracing::info;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `afazo --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;

    let log_path = afazo_db::default_log_path()?;
    logging::init_tracing(&log_path, options.verbose, config.log_level())?;
    info!(
        config = %options.config_path.display(),
        demo = options.demo,
        "starting afazo"
    );

    let db_path = if options.demo {
        PathBuf::from(":memory:")
    } else {
        config.db_path()?
    };
    let preferences = Store::open(&db_path).with_context(|| {
        format!(
            "open database {} -- if this path is wrong, set [storage].db_path or AFAZO_DB_PATH",
            db_path.display()
        )
    })?;
    preferences.bootstrap()?;

    let system = TerminalColorScheme::from_env();
    let mut state = AppState::default();

    if options.demo {
        if options.check_only {
            return Ok(());
        }
        let mut runtime = TaskRuntime::new(FakeTaskStore::demo(), preferences, system);
        return afazo_tui::run_app(&mut state, &mut runtime);
    }

    let client = afazo_api::Client::new(config.api_base_url(), config.api_timeout()?)
        .with_context(|| {
            format!(
                "invalid [api] config in {}; fix base_url/timeout values",
                options.config_path.display()
            )
        })?;
    if options.check_only {
        client.ping()?;
        println!("ok: {}", client.base_url());
        return Ok(());
    }

    let mut runtime = TaskRuntime::new(client, preferences, system);
    afazo_tui::run_app(&mut state, &mut runtime)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_example: bool,
    demo: bool,
    check_only: bool,
    verbose: u8,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        print_config_path: false,
        print_example: false,
        demo: false,
        check_only: false,
        verbose: 0,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--demo" => {
                options.demo = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--verbose" => {
                options.verbose = options.verbose.saturating_add(1);
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            short if is_verbose_cluster(short) => {
                let count = u8::try_from(short.len() - 1).unwrap_or(u8::MAX);
                options.verbose = options.verbose.saturating_add(count);
            }
            unknown => {
                return Err(anyhow::anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

// `-v`, `-vv`, `-vvv`...
fn is_verbose_cluster(arg: &str) -> bool {
    arg.strip_prefix('-')
        .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|ch| ch == 'v'))
}

fn print_help() {
    println!("afazo");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a config template");
    println!("  --demo                   Launch against an in-memory store with demo tasks");
    println!("  --check                  Validate config + DB + task store reachability");
    println!("  -v, --verbose            Raise log verbosity (repeatable)");
    println!("  --help                   Show this help");
}
