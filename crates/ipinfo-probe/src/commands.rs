//! curl invocations used by the acquisition pipeline

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use ipinfo_core::prelude::*;
use url::Url;

/// Program used for every outbound request
pub const CURL: &str = "curl";

/// Query parameter carrying the geolocation API token
pub const TOKEN_PARAM: &str = "apiKey";

/// Shortest limit `curl -m` can express
const MIN_PROBE_TIMEOUT: Duration = Duration::from_secs(1);

/// A fully prepared external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: &'static str,
    pub args: Vec<String>,
    /// Enforced by the runner in addition to any limit curl applies itself
    pub timeout: Option<Duration>,
}

impl Invocation {
    /// Silent HEAD-less GET against `url`, body discarded, bounded by `timeout`
    ///
    /// `curl -s -m <secs> -o /dev/null <url>`
    pub fn reachability(url: &str, timeout: Duration) -> Self {
        // curl and the runner must agree on the limit
        let timeout = timeout.max(MIN_PROBE_TIMEOUT);
        let secs = timeout.as_secs();
        Self {
            program: CURL,
            args: vec![
                "-s".to_string(),
                "-m".to_string(),
                secs.to_string(),
                "-o".to_string(),
                "/dev/null".to_string(),
                url.to_string(),
            ],
            timeout: Some(timeout),
        }
    }

    /// Geolocation lookup with the token as a query credential, no timeout
    ///
    /// `curl -sL <endpoint>?apiKey=<token>`
    pub fn geolocation(endpoint: &str, token: &str) -> Result<Self> {
        let url = geolocation_url(endpoint, token)?;
        Ok(Self {
            program: CURL,
            args: vec!["-sL".to_string(), url.into()],
            timeout: None,
        })
    }

    /// Command line with any token value masked, for logs
    pub fn redacted(&self) -> String {
        let args: Vec<String> = self.args.iter().map(|arg| redact_token(arg)).collect();
        format!("{} {}", self.program, args.join(" "))
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted())
    }
}

/// Build the geolocation URL, appending the token to any existing query
pub fn geolocation_url(endpoint: &str, token: &str) -> Result<Url> {
    Url::parse_with_params(endpoint, &[(TOKEN_PARAM, token)]).map_err(|e| {
        Error::config_invalid(format!("invalid geolocation endpoint '{}': {}", endpoint, e))
    })
}

fn redact_token(arg: &str) -> String {
    let Ok(mut url) = Url::parse(arg) else {
        return arg.to_string();
    };
    if !url.query_pairs().any(|(k, _)| k == TOKEN_PARAM) {
        return arg.to_string();
    }

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == TOKEN_PARAM {
                "***".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();
    url.query_pairs_mut().clear().extend_pairs(pairs);
    url.into()
}

/// Resolve `program` on `PATH`
pub fn locate(program: &str) -> Result<PathBuf> {
    which::which(program).map_err(|e| {
        debug!("{} lookup failed: {}", program, e);
        Error::command_not_found(program)
    })
}
