use cepa_core::{Address, Cep, CepError, LookupReport};

use crate::Cepa;
use crate::race::{RaceOutcome, RaceResult, race};

impl Cepa {
    /// Run one race for `cep` and return the full [`RaceResult`].
    ///
    /// Each call builds a fresh scope and fresh channels; nothing carries over
    /// between races.
    pub async fn race(&self, cep: &Cep) -> RaceResult {
        race(cep, &self.eligible(), self.cfg.timeout).await
    }

    /// Resolve `cep` to the first address any provider returns.
    ///
    /// # Errors
    /// Returns `CepError::Exhausted` when the deadline fires or every provider
    /// fails first. There is no internal retry; start a new lookup to try again.
    pub async fn lookup(&self, cep: &Cep) -> Result<Address, CepError> {
        self.race(cep).await.into_result()
    }

    /// Parse `raw` as a CEP and resolve it.
    ///
    /// # Errors
    /// Returns `InvalidArg` for a malformed CEP, otherwise as [`lookup`](Self::lookup).
    pub async fn lookup_str(&self, raw: &str) -> Result<Address, CepError> {
        let cep = Cep::parse(raw)?;
        self.lookup(&cep).await
    }

    /// Resolve `cep` and describe the race instead of failing.
    ///
    /// On success `warnings` lists the failures observed before the winner. An
    /// exhausted race leaves a single `Exhausted` warning that carries them.
    pub async fn lookup_report(&self, cep: &Cep) -> LookupReport {
        let res = self.race(cep).await;
        let elapsed = res.elapsed;
        match res.outcome {
            RaceOutcome::Winner { provider, address } => LookupReport {
                cep: cep.as_str().to_string(),
                address: Some(address),
                winner: Some(provider.to_string()),
                warnings: res.failures,
                elapsed,
            },
            RaceOutcome::Exhausted(cause) => {
                let warnings = vec![CepError::Exhausted {
                    cause,
                    failures: res.failures,
                }];
                LookupReport {
                    cep: cep.as_str().to_string(),
                    address: None,
                    winner: None,
                    warnings,
                    elapsed,
                }
            }
        }
    }

    /// Resolve several CEPs, one independent race each, all concurrently.
    ///
    /// Returns `(addresses, failures)`; a failed CEP does not affect the others.
    pub async fn lookup_many(&self, ceps: &[Cep]) -> (Vec<Address>, Vec<(Cep, CepError)>) {
        if ceps.is_empty() {
            return (vec![], vec![]);
        }

        let tasks = ceps.iter().map(|cep| async move {
            let res = self.lookup(cep).await;
            (cep.clone(), res)
        });

        let results = futures::future::join_all(tasks).await;

        let mut ok: Vec<Address> = Vec::new();
        let mut failures: Vec<(Cep, CepError)> = Vec::new();
        for (cep, res) in results {
            match res {
                Ok(a) => ok.push(a),
                Err(e) => failures.push((cep, e)),
            }
        }
        (ok, failures)
    }
}
