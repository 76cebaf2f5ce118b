//! Court configuration with TOML file support.

use quill_types::{amount::units, Address, Amount, CourtParams, DAY_SECS};
use quill_utils::LogFormat;
use serde::{Deserialize, Serialize};

use crate::CourtError;

/// Configuration for a court deployment.
///
/// Can be loaded from a TOML file via [`CourtConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Amounts are written as decimal
/// whole units, e.g. `dispute_fee = "0.01"`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CourtConfig {
    /// Identity granted `Admin` on every component.
    #[serde(default = "default_admin")]
    pub admin: Address,

    /// Fee attached when filing a dispute.
    #[serde(default = "default_dispute_fee", with = "units")]
    pub dispute_fee: Amount,

    /// Fee attached when filing an appeal.
    #[serde(default = "default_appeal_fee", with = "units")]
    pub appeal_fee: Amount,

    /// Minimum stake for juror eligibility.
    #[serde(default = "default_min_stake", with = "units")]
    pub min_stake: Amount,

    /// Seconds after the last deposit before a juror may withdraw.
    #[serde(default = "default_lock_period")]
    pub lock_period_secs: u64,

    /// Length of the commit window.
    #[serde(default = "default_commit_period")]
    pub commit_period_secs: u64,

    /// Length of the reveal window.
    #[serde(default = "default_reveal_period")]
    pub reveal_period_secs: u64,

    /// Lowest reputation a juror can fall to.
    #[serde(default = "default_reputation_floor")]
    pub reputation_floor: u64,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_admin() -> Address {
    Address::new("admin")
}

fn default_dispute_fee() -> Amount {
    CourtParams::default().dispute_fee
}

fn default_appeal_fee() -> Amount {
    CourtParams::default().appeal_fee
}

fn default_min_stake() -> Amount {
    CourtParams::default().min_stake
}

fn default_lock_period() -> u64 {
    30 * DAY_SECS
}

fn default_commit_period() -> u64 {
    3 * DAY_SECS
}

fn default_reveal_period() -> u64 {
    2 * DAY_SECS
}

fn default_reputation_floor() -> u64 {
    1
}

fn default_log_format() -> LogFormat {
    LogFormat::Human
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl CourtConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, CourtError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| CourtError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, CourtError> {
        toml::from_str(s).map_err(|e| CourtError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("CourtConfig is always serializable to TOML")
    }

    /// The component parameters this configuration describes.
    pub fn params(&self) -> CourtParams {
        CourtParams {
            dispute_fee: self.dispute_fee,
            appeal_fee: self.appeal_fee,
            min_stake: self.min_stake,
            lock_period_secs: self.lock_period_secs,
            reputation_floor: self.reputation_floor,
            commit_period_secs: self.commit_period_secs,
            reveal_period_secs: self.reveal_period_secs,
        }
    }
}

impl Default for CourtConfig {
    fn default() -> Self {
        Self {
            admin: default_admin(),
            dispute_fee: default_dispute_fee(),
            appeal_fee: default_appeal_fee(),
            min_stake: default_min_stake(),
            lock_period_secs: default_lock_period(),
            commit_period_secs: default_commit_period(),
            reveal_period_secs: default_reveal_period(),
            reputation_floor: default_reputation_floor(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = CourtConfig::default();
        let toml_str = config.to_toml_string();
        let parsed = CourtConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed, config);
        assert!(toml_str.contains("dispute_fee = \"0.01\""));
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = CourtConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.params(), CourtParams::default());
        assert_eq!(config.log_format, LogFormat::Human);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            admin = "court-admin"
            appeal_fee = "2.5"
            commit_period_secs = 60
            log_format = "json"
        "#;
        let config = CourtConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.admin, Address::new("court-admin"));
        assert_eq!(config.appeal_fee, Amount::from_fraction(5, 2));
        assert_eq!(config.params().commit_period_secs, 60);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.reveal_period_secs, 2 * DAY_SECS); // default
    }

    #[test]
    fn bad_amount_is_config_error() {
        let result = CourtConfig::from_toml_str("min_stake = \"lots\"");
        assert!(matches!(result, Err(CourtError::Config(_))));
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = CourtConfig::from_toml_file("/nonexistent/quill.toml");
        assert!(matches!(result, Err(CourtError::Config(_))));
    }
}
