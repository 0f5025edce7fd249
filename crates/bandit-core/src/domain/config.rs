//! BanditConfig - engine の構築設定
//!
//! JSON などから読み込む想定なので serde で定義しています。
//! 読み込み失敗も検証失敗も `BanditError::Configuration` に揃えます。

use serde::{Deserialize, Serialize};

use super::errors::BanditError;

/// UCB1 の探索係数のデフォルト（`sqrt(2 * ln N / n)` に相当）
pub const DEFAULT_EXPLORATION: f64 = 2.0;

fn default_exploration() -> f64 {
    DEFAULT_EXPLORATION
}

/// BanditConfig は engine の設定
///
/// # フィールド
/// - `arms`: アーム数（1 以上の整数、必須）
/// - `exploration`: UCB1 の係数 c（有限かつ正）
/// - `seed`: デフォルト RNG のシード（省略時は thread rng）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BanditConfig {
    pub arms: usize,

    #[serde(default = "default_exploration")]
    pub exploration: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl BanditConfig {
    pub fn new(arms: usize) -> Self {
        Self {
            arms,
            exploration: DEFAULT_EXPLORATION,
            seed: None,
        }
    }

    pub fn with_exploration(mut self, exploration: f64) -> Self {
        self.exploration = exploration;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// JSON 文字列から読み込んで検証する
    pub fn from_json_str(json: &str) -> Result<Self, BanditError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| BanditError::configuration(format!("cannot parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// JSON value から読み込んで検証する
    ///
    /// `arms` が小数・負数・文字列の場合はここで弾かれる。
    pub fn from_value(value: serde_json::Value) -> Result<Self, BanditError> {
        let config: Self = serde_json::from_value(value)
            .map_err(|e| BanditError::configuration(format!("cannot parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), BanditError> {
        if self.arms < 1 {
            return Err(BanditError::configuration(format!(
                "arms must be at least 1, got {}",
                self.arms
            )));
        }
        if !self.exploration.is_finite() || self.exploration <= 0.0 {
            return Err(BanditError::configuration(format!(
                "exploration must be a positive finite number, got {}",
                self.exploration
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn minimal_json_gets_defaults() {
        let config = BanditConfig::from_json_str(r#"{ "arms": 4 }"#).unwrap();
        assert_eq!(config.arms, 4);
        assert_eq!(config.exploration, DEFAULT_EXPLORATION);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn builder_methods_set_fields() {
        let config = BanditConfig::new(3).with_exploration(0.5).with_seed(7);
        assert_eq!(config.exploration, 0.5);
        assert_eq!(config.seed, Some(7));
        assert!(config.validate().is_ok());
    }

    #[rstest]
    #[case::zero(json!({ "arms": 0 }))]
    #[case::fractional(json!({ "arms": 2.5 }))]
    #[case::negative(json!({ "arms": -3 }))]
    #[case::string(json!({ "arms": "three" }))]
    #[case::missing(json!({}))]
    #[case::unknown_field(json!({ "arms": 2, "armz": 3 }))]
    #[case::zero_exploration(json!({ "arms": 2, "exploration": 0.0 }))]
    #[case::negative_exploration(json!({ "arms": 2, "exploration": -1.0 }))]
    fn invalid_configs_are_rejected(#[case] value: serde_json::Value) {
        let result = BanditConfig::from_value(value);
        assert!(matches!(result, Err(BanditError::Configuration(_))));
    }

    #[test]
    fn non_finite_exploration_is_rejected() {
        let config = BanditConfig::new(2).with_exploration(f64::INFINITY);
        assert!(matches!(config.validate(), Err(BanditError::Configuration(_))));
    }

    #[test]
    fn malformed_json_is_a_configuration_error() {
        let result = BanditConfig::from_json_str("{ arms: ");
        assert!(matches!(result, Err(BanditError::Configuration(_))));
    }
}
