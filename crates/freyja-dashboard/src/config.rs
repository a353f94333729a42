//! Runtime settings from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use jiff::tz::TimeZone;
use thiserror::Error;

use freyja_ai::bedrock::DEFAULT_MODEL_ID;
use freyja_publish::oauth::Credentials;
use freyja_publish::twitter::DEFAULT_API_BASE;
use freyja_publish::TwitterConfig;
use freyja_queue::sweep::AutoPublishConfig;

const DEFAULT_BIND: &str = "127.0.0.1:8000";
const DEFAULT_BUCKET: &str = "freyja-content";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {var}={value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("incomplete Twitter credentials: {0} must be set together")]
    IncompleteCredentials(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    S3 { bucket: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiProvider {
    Simulation,
    Bedrock { model_id: String },
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub bind: SocketAddr,
    pub log_format: LogFormat,
    /// Zone for displaying times and reading `YYYY-MM-DDTHH:MM` schedule input.
    pub time_zone: TimeZone,
    pub store: StoreBackend,
    pub ai: AiProvider,
    /// `None` when auto-publishing is disabled.
    pub auto_publish: Option<AutoPublishConfig>,
    pub brand_config: Option<PathBuf>,
    /// `None` runs the simulated publisher.
    pub twitter: Option<TwitterConfig>,
}

const TWITTER_VARS: &str =
    "TWITTER_API_KEY, TWITTER_API_SECRET, TWITTER_ACCESS_TOKEN and TWITTER_ACCESS_TOKEN_SECRET";

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let bind_raw = get("FREYJA_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_raw.parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
            var: "FREYJA_BIND",
            value: bind_raw.clone(),
            reason: e.to_string(),
        })?;

        let log_format = match get("FREYJA_LOG_FORMAT").as_deref() {
            None | Some("pretty") | Some("text") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => return Err(invalid("FREYJA_LOG_FORMAT", other, "expected pretty or json")),
        };

        let time_zone = match get("FREYJA_TIMEZONE") {
            None => TimeZone::UTC,
            Some(name) => TimeZone::get(&name).map_err(|e| ConfigError::Invalid {
                var: "FREYJA_TIMEZONE",
                value: name.clone(),
                reason: e.to_string(),
            })?,
        };

        let store = match get("FREYJA_STORE").as_deref() {
            None | Some("memory") => StoreBackend::Memory,
            Some("s3") => StoreBackend::S3 {
                bucket: get("FREYJA_BUCKET").unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
            },
            Some(other) => return Err(invalid("FREYJA_STORE", other, "expected memory or s3")),
        };

        let ai = match get("FREYJA_AI_PROVIDER").as_deref() {
            None | Some("simulation") => AiProvider::Simulation,
            Some("bedrock") => AiProvider::Bedrock {
                model_id: get("FREYJA_BEDROCK_MODEL").unwrap_or_else(|| DEFAULT_MODEL_ID.to_string()),
            },
            Some(other) => {
                return Err(invalid("FREYJA_AI_PROVIDER", other, "expected simulation or bedrock"));
            }
        };

        let auto_publish = if parse_bool(&get, "FREYJA_AUTO_PUBLISH", true)? {
            let defaults = AutoPublishConfig::default();
            Some(AutoPublishConfig {
                interval: Duration::from_secs(parse_positive(
                    &get,
                    "FREYJA_PUBLISH_INTERVAL_SECS",
                    defaults.interval.as_secs(),
                )?),
                include_approved: parse_bool(&get, "FREYJA_AUTO_PUBLISH_APPROVED", true)?,
                workers: parse_positive(&get, "FREYJA_PUBLISH_WORKERS", defaults.workers as u64)?
                    as usize,
                channel_capacity: defaults.channel_capacity,
            })
        } else {
            None
        };

        let twitter = twitter_config(&get)?;

        Ok(Self {
            bind,
            log_format,
            time_zone,
            store,
            ai,
            auto_publish,
            brand_config: get("FREYJA_BRAND_CONFIG").map(PathBuf::from),
            twitter,
        })
    }
}

fn twitter_config(get: &impl Fn(&str) -> Option<String>) -> Result<Option<TwitterConfig>, ConfigError> {
    let parts = [
        get("TWITTER_API_KEY"),
        get("TWITTER_API_SECRET"),
        get("TWITTER_ACCESS_TOKEN"),
        get("TWITTER_ACCESS_TOKEN_SECRET"),
    ];
    match parts {
        [None, None, None, None] => Ok(None),
        [Some(consumer_key), Some(consumer_secret), Some(token), Some(token_secret)] => {
            let credentials = Credentials {
                consumer_key,
                consumer_secret,
                token,
                token_secret,
            };
            let api_base = get("TWITTER_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string());
            Ok(Some(TwitterConfig::new(credentials).with_api_base(api_base)))
        }
        _ => Err(ConfigError::IncompleteCredentials(TWITTER_VARS)),
    }
}

fn invalid(var: &'static str, value: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_bool(
    get: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: bool,
) -> Result<bool, ConfigError> {
    let Some(value) = get(var) else {
        return Ok(default);
    };
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(var, &value, "expected true or false")),
    }
}

fn parse_positive(
    get: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: u64,
) -> Result<u64, ConfigError> {
    let Some(value) = get(var) else {
        return Ok(default);
    };
    match value.parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(invalid(var, &value, "expected a positive integer")),
    }
}
