//! Headless runner for form fixtures.
//!
//! Loads a form described in TOML, binds a controller to it, triggers a
//! submission and prints what happened as JSON on stdout. Logs go to stderr.
//!
//! # Usage
//!
//! ```text
//! formbits <form.toml> [--config <config.toml>] [--respond <status> [--body <text>]]
//! ```
//!
//! - `--config`: configuration file (`trace_level` and an `[options]` table)
//! - `--respond`: settles the dispatched request with a synthetic response
//!   carrying this HTTP status
//! - `--body`: body of the synthetic response, `{}` by default
//!
//! # Output
//!
//! ```text
//! {
//!   "cancelled": true,
//!   "request": { "url": "/contact", "method": "POST", ... },
//!   "target": "/contact",
//!   "body": "email=a%40b.com",
//!   "alerts": ["Your data has been successfully saved"],
//!   "phase": "idle"
//! }
//! ```

#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use formbits::domain::FormElement;
use formbits::notify::RecordingNotifier;
use formbits::transport::{RecordingTransport, Response};
use formbits::{Config, FormController, Result};
use serde_json::{json, Value};

#[derive(Parser, Debug)]
#[command(name = "formbits")]
#[command(about = "Submit a form fixture through a headless controller", long_about = None)]
#[command(version)]
struct Args {
    /// Form fixture to bind and submit
    #[arg(value_name = "FORM")]
    form: PathBuf,

    /// Configuration file with `trace_level` and an `[options]` table
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Settle the dispatched request with a response carrying this HTTP status
    #[arg(short, long, value_name = "STATUS")]
    respond: Option<u16>,

    /// Body of the synthetic response, `{}` when omitted
    #[arg(short, long, requires = "respond")]
    body: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "run failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<String> {
    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    formbits::observability::init_tracing(&config);

    let span = tracing::debug_span!("run", form = %args.form.display());
    let _guard = span.entered();

    let element = FormElement::from_file(&args.form)?.into_handle();
    let transport = RecordingTransport::new();
    let notifier = RecordingNotifier::new();
    let mut form = FormController::builder(&element, transport.clone())
        .options(config.options)
        .notifier(notifier.clone())
        .bind();

    let event = form.trigger_submit();
    tracing::debug!(
        cancelled = event.is_default_prevented(),
        dispatched = transport.len(),
        "submission handled"
    );

    let mut report = json!({ "cancelled": event.is_default_prevented() });
    if let Some((ticket, request)) = transport.last() {
        report["target"] = Value::String(request.target()?);
        report["body"] = request.body()?.map_or(Value::Null, Value::String);
        report["request"] = serde_json::to_value(&request)?;

        if let Some(status) = args.respond {
            let body = args.body.as_deref().unwrap_or("{}");
            form.settle(ticket, Ok(Response::new(status, body)))?;
        }
    }

    report["alerts"] = json!(notifier.alerts());
    report["phase"] = json!(if form.phase().is_sending() { "sending" } else { "idle" });

    Ok(serde_json::to_string_pretty(&report)?)
}
