use std::ffi::OsString;
use std::time::Duration;

use clap::Parser;
use employee_core::config::{DEFAULT_BASE_URL, ENV_BASE_URL, ENV_TIMEOUT_SECS, ENV_TOKEN};
use employee_core::{ClientConfig, ClientVariant};

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Terminal front end for the employee CRUD API", long_about = None)]
pub struct CommandLineArgs {
    /// Base URL of the API serving `/employees`.
    #[arg(long, env = ENV_BASE_URL, default_value = DEFAULT_BASE_URL, value_parser = parse_base_url)]
    pub base_url: String,

    /// Bearer token attached to every request.
    #[arg(long, env = ENV_TOKEN, hide_env_values = true, value_parser = parse_token)]
    pub token: Option<String>,

    /// HTTP client to start with: `wrapped` or `fetch`.
    #[arg(long, env = "EMPLOYEE_API_VARIANT", default_value = "wrapped")]
    pub variant: ClientVariant,

    /// Per-request timeout in seconds.
    #[arg(long, env = ENV_TIMEOUT_SECS, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Log request lifecycle at info level.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommandLineArgs {
    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::parse_from(itr)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.base_url)
            .with_token(self.token.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }

    /// Default `RUST_LOG` directive when the variable is unset.
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose {
            "info"
        } else {
            "warn"
        }
    }
}

// Invalid values are usage errors at startup rather than failures on first use.

fn parse_base_url(value: &str) -> Result<String, String> {
    ClientConfig::new(value).validate().map_err(|e| e.to_string())?;
    Ok(value.to_string())
}

fn parse_token(value: &str) -> Result<String, String> {
    ClientConfig::default()
        .with_token(Some(value.to_string()))
        .validate()
        .map_err(|e| e.to_string())?;
    Ok(value.to_string())
}
