//! `cepa` binary: races BrasilAPI and ViaCEP for each CEP given and prints
//! the first answer.
//!
//! Exit codes: 0 when every CEP resolved, 1 when a race produced no address
//! (or output failed), 2 for bad arguments.

mod args;

use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use cepa::{Cep, CepError, Cepa, CepProvider, JsonPresenter, Presenter, TextPresenter};
use cepa_brasilapi::BrasilApiProvider;
use cepa_viacep::ViaCepProvider;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::args::Cli;

const EXIT_UNANSWERED: u8 = 1;
const EXIT_USAGE: u8 = 2;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn build(cli: &Cli) -> Result<Cepa, CepError> {
    // Both adapters share one connection pool.
    let http = reqwest::Client::new();
    let brasilapi: Arc<dyn CepProvider> = Arc::new(
        BrasilApiProvider::with_client(http.clone()).with_base_url(&cli.brasilapi_url)?,
    );
    let viacep: Arc<dyn CepProvider> =
        Arc::new(ViaCepProvider::with_client(http).with_base_url(&cli.viacep_url)?);

    let keys: Vec<_> = cli.providers.iter().map(|p| p.key()).collect();
    Cepa::builder()
        .with_provider(brasilapi)
        .with_provider(viacep)
        .timeout(Duration::from_millis(cli.timeout_ms))
        .only(&keys)
        .build()
}

fn report_failure(cep: &Cep, err: CepError) {
    eprintln!("error: {err}");
    if err.is_exhausted() {
        for f in err.flatten() {
            eprintln!("  {cep}: {f}");
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let mut ceps = Vec::new();
    for raw in cli.ceps_or_default() {
        match Cep::parse(raw) {
            Ok(c) => ceps.push(c),
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::from(EXIT_USAGE);
            }
        }
    }

    let cepa = match build(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(EXIT_USAGE);
        }
    };
    tracing::debug!(?cepa, "configured");

    let mut presenter: Box<dyn Presenter> = if cli.json {
        Box::new(JsonPresenter::new(io::stdout()))
    } else {
        Box::new(TextPresenter::new(io::stdout()))
    };

    let mut code = ExitCode::SUCCESS;
    for cep in &ceps {
        if !cli.json {
            println!("Looking up CEP {}\n", cep.formatted());
        }
        match cepa.lookup(cep).await {
            Ok(address) => {
                if let Err(e) = presenter.present(&address) {
                    eprintln!("error: cannot write result: {e}");
                    return ExitCode::from(EXIT_UNANSWERED);
                }
            }
            Err(e) => {
                report_failure(cep, e);
                code = ExitCode::from(EXIT_UNANSWERED);
            }
        }
    }
    code
}
