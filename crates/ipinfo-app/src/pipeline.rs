//! Acquisition pipeline: enable check, reachability probe, geolocation fetch
//!
//! Strictly sequential. Every branch ends in a [`PipelineResult`]; upstream
//! failures never escape as errors.

use ipinfo_core::prelude::*;
use ipinfo_core::{Configuration, FetchError, GeolocationPayload, PipelineResult};
use ipinfo_probe::{Invocation, ProcessRunner};
use serde_json::Value;

use crate::config::Settings;

/// Marker the provider puts in `message` once the daily quota is used up
pub const RATE_LIMIT_MARKER: &str = "exceeded the limit";

/// Run one acquisition for `config`
#[instrument(skip_all, fields(enabled = ?config.as_ref().map(|c| c.enabled)))]
pub async fn acquire<R: ProcessRunner>(
    config: Option<Configuration>,
    runner: &R,
    settings: &Settings,
) -> PipelineResult {
    let Some(config) = config else {
        info!("No configuration record, nothing to acquire");
        return PipelineResult::Missing;
    };

    if !config.enabled {
        info!("IP information disabled, skipping probes");
        return PipelineResult::Disabled(config);
    }

    if !is_reachable(runner, settings).await {
        info!("Reachability probe failed, reporting disconnected");
        return PipelineResult::Unreachable(config);
    }

    match fetch_geolocation(runner, settings, &config.token).await {
        Ok(payload) => {
            info!("Geolocation payload received ({} fields)", payload.len());
            PipelineResult::Fetched {
                configuration: config,
                payload,
            }
        }
        Err(error) => {
            warn!("Geolocation lookup failed: {:?}", error);
            PipelineResult::Failed {
                configuration: config,
                error,
            }
        }
    }
}

/// Exit code 0 from the probe means online; anything else, including a
/// failure to start curl, means offline
async fn is_reachable<R: ProcessRunner>(runner: &R, settings: &Settings) -> bool {
    let probe = Invocation::reachability(&settings.probe.url, settings.probe.timeout());
    debug!("Running {}", probe);

    match runner.run(probe.program, &probe.args, probe.timeout).await {
        Ok(output) => {
            debug!("Probe exit code {}", output.exit_code);
            output.success()
        }
        Err(e) => {
            warn!("Probe could not run: {}", e);
            false
        }
    }
}

async fn fetch_geolocation<R: ProcessRunner>(
    runner: &R,
    settings: &Settings,
    token: &str,
) -> std::result::Result<GeolocationPayload, FetchError> {
    let lookup = Invocation::geolocation(&settings.geolocation.endpoint, token)
        .map_err(|e| FetchError::malformed(e.to_string()))?;
    debug!("Running {}", lookup);

    let output = runner
        .run(lookup.program, &lookup.args, lookup.timeout)
        .await
        .map_err(|e| FetchError::malformed(e.to_string()))?;
    if !output.success() {
        // curl may still have printed a body worth reading
        debug!("Geolocation lookup exited with {}", output.exit_code);
    }

    interpret_response(&output.stdout)
}

/// Classify the provider's response body
pub fn interpret_response(body: &str) -> std::result::Result<GeolocationPayload, FetchError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| FetchError::malformed(e.to_string()))?;

    let Value::Object(payload) = value else {
        return Err(FetchError::malformed("response is not a JSON object"));
    };

    if is_rate_limited(&payload) {
        return Err(FetchError::RateLimited);
    }

    Ok(payload)
}

fn is_rate_limited(payload: &GeolocationPayload) -> bool {
    payload
        .get("message")
        .and_then(Value::as_str)
        .is_some_and(|message| message.to_ascii_lowercase().contains(RATE_LIMIT_MARKER))
}
