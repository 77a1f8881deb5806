// SPDX-License-Identifier: MPL-2.0
//! Runs a JSON response body through the server message interceptor and
//! prints every published message as a JSON line.
//!
//! ```text
//! growl [--config PATH] [--lang LOCALE] [--status CODE] [-v] [FILE]
//! ```
//!
//! The body is read from `FILE`, or from stdin when no file is given.

use growl::config;
use growl::error::{Error, Result};
use growl::{FluentTranslator, HttpResponse, Message, NotificationService};
use std::cell::Cell;
use std::io::Read;
use std::path::PathBuf;
use std::rc::Rc;

struct Args {
    config: Option<PathBuf>,
    lang: Option<String>,
    status: u16,
    verbose: bool,
    file: Option<PathBuf>,
}

fn parse_args() -> std::result::Result<Args, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    Ok(Args {
        config: args.opt_value_from_str("--config")?,
        lang: args.opt_value_from_str("--lang")?,
        status: args.opt_value_from_str("--status")?.unwrap_or(200),
        verbose: args.contains(["-v", "--verbose"]),
        file: args.opt_free_from_str()?,
    })
}

fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => config::load_from_path(path)?,
        None => config::load()?,
    };
    let translator = FluentTranslator::new(args.lang.as_deref(), &config);

    let mut body = String::new();
    match &args.file {
        Some(path) => body = std::fs::read_to_string(path)?,
        None => {
            std::io::stdin().read_to_string(&mut body)?;
        }
    }
    let data: serde_json::Value = serde_json::from_str(&body)?;

    let mut service = NotificationService::new(config).with_translator(translator);
    let failures = Rc::new(Cell::new(0usize));
    let counter = Rc::clone(&failures);
    service.subscribe_fn(move |message: &Message| match serde_json::to_string(message) {
        Ok(line) => println!("{line}"),
        Err(err) => {
            log::error!("cannot serialize message: {err}");
            counter.set(counter.get() + 1);
        }
    });

    let outcome = service
        .interceptor()
        .intercept(HttpResponse::new(args.status, data).into_result());
    if let Err(rejected) = outcome {
        log::info!("response status {} treated as a rejection", rejected.status);
    }

    match failures.get() {
        0 => Ok(()),
        n => Err(Error::Payload(format!("{n} message(s) could not be printed"))),
    }
}

fn main() {
    let args = match parse_args() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("growl: {err}");
            std::process::exit(2);
        }
    };

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    if let Err(err) = simple_logger::SimpleLogger::new().with_level(level).init() {
        eprintln!("growl: cannot initialize logging: {err}");
    }

    if let Err(err) = run(args) {
        log::error!("{err}");
        std::process::exit(1);
    }
}
