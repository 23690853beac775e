use clap::{Parser, ValueEnum};

/// CEP looked up when none is given (Praça da Sé, São Paulo).
pub const DEFAULT_CEP: &str = "01001000";

#[derive(Parser, Debug)]
#[command(
    name = "cepa",
    version,
    about = "Look up a Brazilian CEP across BrasilAPI and ViaCEP; the first answer wins"
)]
pub struct Cli {
    /// CEPs to look up, 8 digits with an optional hyphen
    pub ceps: Vec<String>,

    /// Deadline for the whole race, in milliseconds
    #[arg(long, env = "CEPA_TIMEOUT_MS", default_value_t = 1000)]
    pub timeout_ms: u64,

    /// Race only these providers (repeatable); defaults to all of them
    #[arg(long = "provider", value_enum)]
    pub providers: Vec<ProviderArg>,

    /// Print the winning address as one JSON object per line
    #[arg(long)]
    pub json: bool,

    #[arg(long, env = "CEPA_BRASILAPI_URL", default_value = cepa_brasilapi::DEFAULT_BASE_URL, hide = true)]
    pub brasilapi_url: String,

    #[arg(long, env = "CEPA_VIACEP_URL", default_value = cepa_viacep::DEFAULT_BASE_URL, hide = true)]
    pub viacep_url: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ProviderArg {
    Brasilapi,
    Viacep,
}

impl ProviderArg {
    pub const fn key(self) -> cepa::ProviderKey {
        match self {
            Self::Brasilapi => cepa_brasilapi::BrasilApiProvider::KEY,
            Self::Viacep => cepa_viacep::ViaCepProvider::KEY,
        }
    }
}

impl Cli {
    /// Positional CEPs, or the default one when none was given.
    pub fn ceps_or_default(&self) -> Vec<&str> {
        if self.ceps.is_empty() {
            vec![DEFAULT_CEP]
        } else {
            self.ceps.iter().map(String::as_str).collect()
        }
    }
}
