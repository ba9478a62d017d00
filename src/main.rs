//! Purpose: `reqwire` CLI entry point; issues one request and prints the payload.
//! Role: Binary crate root; parses args, builds options, runs `api::execute`.
//! Invariants: Success writes the raw payload to stdout and nothing else.
//! Invariants: Non-interactive errors are emitted as one JSON line on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueHint, error::ErrorKind as ClapErrorKind};
use reqwire::api::{
    AgentTransport, AgentTransportConfig, Error, ErrorKind, RequestOption, execute, to_exit_code,
    with_header, with_json_body,
};
use serde_json::{Map, Value, json};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "reqwire",
    version,
    about = "Send one HTTP request and print the body of a 200 response",
    after_help = "Any status other than 200 is reported as `[<status>] <body>` on stderr.\nSet RUST_LOG=debug to trace the request."
)]
struct Cli {
    /// HTTP method (GET, POST, ... or any extension token such as PROPFIND)
    method: String,
    /// Target URL
    #[arg(value_hint = ValueHint::Url)]
    url: String,
    /// Inline JSON request body
    #[arg(long, value_name = "DATA", conflicts_with = "json_file")]
    json: Option<String>,
    /// Read the JSON request body from a file
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    json_file: Option<PathBuf>,
    /// Send the body even if it does not parse as JSON
    #[arg(long)]
    no_validate: bool,
    /// Extra request header (repeatable)
    #[arg(short = 'H', long = "header", value_name = "NAME:VALUE")]
    headers: Vec<String>,
    /// Overall request deadline in milliseconds
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<u64>,
    /// Maximum redirects to follow (0 disables)
    #[arg(long, value_name = "N")]
    max_redirects: Option<u32>,
}

fn main() {
    init_tracing();
    let exit_code = match run() {
        Ok(code) => code,
        Err(err) => {
            emit_error(&err);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<i32, Error> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => {
                err.print().map_err(|io_err| {
                    Error::new(ErrorKind::Io)
                        .with_message("failed to write help")
                        .with_source(io_err)
                })?;
                return Ok(0);
            }
            _ => {
                let message = clap_error_summary(&err);
                return Err(Error::new(ErrorKind::Usage).with_message(message));
            }
        },
    };

    let options = request_options(&cli)?;
    let transport = AgentTransport::with_config(&transport_config(&cli));
    let payload = execute(&transport, &cli.url, &cli.method, options)?;

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(&payload)
        .and_then(|()| stdout.flush())
        .map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to write response")
                .with_source(err)
        })?;
    Ok(0)
}

fn request_options(cli: &Cli) -> Result<Vec<RequestOption>, Error> {
    let mut options = Vec::with_capacity(cli.headers.len() + 1);
    for raw in &cli.headers {
        let (name, value) = parse_header(raw)?;
        options.push(with_header(name, value));
    }

    let body = match (&cli.json, &cli.json_file) {
        (Some(inline), _) => Some(inline.clone().into_bytes()),
        (None, Some(path)) => Some(std::fs::read(path).map_err(|err| {
            Error::new(ErrorKind::Usage)
                .with_message(format!("failed to read json file {}", path.display()))
                .with_source(err)
        })?),
        (None, None) => None,
    };
    if let Some(body) = body {
        if !cli.no_validate {
            serde_json::from_slice::<Value>(&body).map_err(|err| {
                Error::new(ErrorKind::Usage)
                    .with_message("request body is not valid json")
                    .with_source(err)
            })?;
        }
        options.push(with_json_body(body));
    }
    Ok(options)
}

fn transport_config(cli: &Cli) -> AgentTransportConfig {
    let mut config = AgentTransportConfig::new();
    if let Some(ms) = cli.timeout_ms {
        config = config.with_timeout(Duration::from_millis(ms));
    }
    if let Some(redirects) = cli.max_redirects {
        config = config.with_redirects(redirects);
    }
    config
}

fn parse_header(raw: &str) -> Result<(String, String), Error> {
    let Some((name, value)) = raw.split_once(':') else {
        return Err(Error::new(ErrorKind::Usage)
            .with_message(format!("header must be NAME:VALUE, got {raw:?}")));
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::new(ErrorKind::Usage).with_message("header name must not be empty"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

fn clap_error_summary(err: &clap::Error) -> String {
    let rendered = err.to_string();
    rendered
        .lines()
        .find(|line| !line.trim().is_empty())
        .map(|line| line.trim_start_matches("error: ").trim().to_string())
        .unwrap_or_else(|| "invalid arguments".to_string())
}

fn emit_error(err: &Error) {
    if io::stderr().is_terminal() {
        eprintln!("error: {err}");
        return;
    }

    let json = serde_json::to_string(&error_json(err)).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Io\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(err.to_string()));
    if let Some(status) = err.status_code() {
        inner.insert("status".to_string(), json!(status));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}
