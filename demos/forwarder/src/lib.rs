//! Settings of the forwarder demo.
//!
//! The bot token has no file value and no default, so it must arrive via
//! `APP_TG_BOT_TOKEN` or `--tg-bot-token`. Everything under `Application`
//! shares the `APP` environment prefix while flags stay unprefixed.

use cascade_config::Configuration;
use serde::{Deserialize, Serialize};

/// Root of the configuration file.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize, Configuration)]
#[serde(default)]
pub struct Config {
    /// Service settings.
    #[serde(rename = "Application")]
    #[cascade(env = "APP", flag = "", category = "Application")]
    pub application: Application,
}

/// Settings consumed by the service.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize, Configuration)]
#[serde(default, rename_all = "PascalCase")]
pub struct Application {
    /// One of `debug`, `warning`, `info`, `error` or `fatal`.
    #[cascade(env = "LOGLEVEL", default = "error")]
    pub log_level: String,
    /// Telegram bot token.
    #[serde(rename = "TGBotToken")]
    #[cascade(flag = "tg-bot-token", env = "TG_BOT_TOKEN")]
    pub tg_bot_token: String,
    /// Port of the media proxy.
    #[cascade(flag = "port", env = "PORT")]
    pub port: u16,
    /// Public domain the chat service uses to reach the media proxy.
    #[cascade(flag = "domain", env = "DOMAIN")]
    pub domain: String,
    /// Proxy for outgoing requests.
    #[serde(rename = "ProxyURL")]
    #[cascade(flag = "proxy-url", env = "PROXY_URL", cli = "optional")]
    pub proxy_url: String,
}

/// Maps a configured log level to a tracing filter directive.
///
/// Unknown levels fall back to `error`.
///
/// ```
/// assert_eq!(forwarder::log_filter("warning"), "warn");
/// assert_eq!(forwarder::log_filter("verbose"), "error");
/// ```
#[must_use]
pub fn log_filter(level: &str) -> &'static str {
    match level {
        "debug" => "debug",
        "warning" => "warn",
        "info" => "info",
        _ => "error",
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for the demo settings.

    use super::{Config, log_filter};
    use cascade_config::{Configuration, ParseOptions, walk};
    use rstest::rstest;

    #[rstest]
    #[case("debug", "debug")]
    #[case("warning", "warn")]
    #[case("info", "info")]
    #[case("error", "error")]
    #[case("fatal", "error")]
    #[case("", "error")]
    fn levels_map_to_filters(#[case] level: &str, #[case] expected: &str) {
        assert_eq!(log_filter(level), expected);
    }

    #[test]
    fn env_keys_share_the_application_prefix() -> anyhow::Result<()> {
        let bindings = walk(
            &Config::default(),
            &Config::schema(),
            &ParseOptions::file_and_env(),
        )
        .map_err(|err| anyhow::anyhow!("{err}"))?;
        let env: Vec<_> = bindings.iter().filter_map(|b| b.env.as_deref()).collect();
        assert_eq!(
            env,
            ["APP_LOGLEVEL", "APP_TG_BOT_TOKEN", "APP_PORT", "APP_DOMAIN", "APP_PROXY_URL"]
        );
        Ok(())
    }
}
