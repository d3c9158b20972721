//! Quanta command-line front end
//!
//! With arguments, runs one request and prints the result:
//!
//! ```text
//! quanta best "2 pints"
//! quanta compound "0.625 cups" --units=c,tbsp,tsp
//! ```
//!
//! Without arguments, reads one JSON request per line from stdin and writes
//! one JSON response per line to stdout. Logs go to stderr; set `QUANTA_LOG`
//! to `trace`, `debug`, `info`, `warn` or `error`.

mod dispatch;
mod operations;
mod protocol;

use std::env;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use tracing::{debug, error, info, Level};
use quanta_core::QuantaError;

use dispatch::Dispatcher;
use protocol::{Request, Response};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn init_logging() {
    let level = env::var("QUANTA_LOG")
        .ok()
        .and_then(|v| v.parse::<Level>().ok())
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_logging();

    let dispatcher = match Dispatcher::standard() {
        Ok(d) => d,
        Err(e) => {
            error!(error = %e, "failed to load unit tables");
            return ExitCode::FAILURE;
        }
    };

    let words: Vec<String> = env::args().skip(1).collect();
    if !words.is_empty() {
        return run_once(&dispatcher, &words);
    }

    match serve(&dispatcher) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "i/o failure");
            ExitCode::FAILURE
        }
    }
}

fn run_once(dispatcher: &Dispatcher, words: &[String]) -> ExitCode {
    let response = match Request::from_args(words) {
        Ok(request) => dispatcher.handle(&request),
        Err(e) => Response::failure(None, e),
    };

    match (response.result, response.error) {
        (Some(serde_json::Value::String(text)), _) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        (Some(value), _) => match serde_json::to_string_pretty(&value) {
            Ok(text) => {
                println!("{}", text);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{}", QuantaError::internal(e.to_string()));
                ExitCode::FAILURE
            }
        },
        (None, Some(err)) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
        (None, None) => ExitCode::FAILURE,
    }
}

fn serve(dispatcher: &Dispatcher) -> io::Result<()> {
    info!(version = VERSION, "quanta ready, reading requests from stdin");

    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin.lock());
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            info!("end of input");
            return Ok(());
        }
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        debug!(bytes = text.len(), "received request");

        let response = match serde_json::from_str::<Request>(text) {
            Ok(request) => dispatcher.handle(&request),
            Err(e) => {
                error!(error = %e, "malformed request");
                Response::failure(None, QuantaError::invalid_request(e.to_string()))
            }
        };

        let json = match serde_json::to_string(&response) {
            Ok(json) => json,
            Err(e) => {
                error!(error = %e, "failed to encode response");
                r#"{"ok":false,"error":{"code":"INTERNAL","message":"Internal error: response encoding failed"}}"#.to_string()
            }
        };
        writeln!(out, "{}", json)?;
        out.flush()?;
    }
}
