use serde::{Deserialize, Serialize};

use super::dice::{DiceError, DICE_PER_ROLL};

/// 单次最多允许摇的骰子数，防止前端传入离谱的配置。
pub const MAX_DICE_COUNT: usize = 64;

/// 摇骰器配置，缺省字段取默认值。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RollerConfig {
    pub dice_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// 为 true 时判定前先校验骰子个数与点数范围。
    pub strict: bool,
}

impl RollerConfig {
    pub fn from_json(json: &str) -> Result<Self, DiceError> {
        let config: RollerConfig =
            serde_json::from_str(json).map_err(|error| DiceError::InvalidConfig {
                message: error.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DiceError> {
        if self.dice_count > MAX_DICE_COUNT {
            return Err(DiceError::InvalidConfig {
                message: format!(
                    "dice_count {} exceeds {MAX_DICE_COUNT}",
                    self.dice_count
                ),
            });
        }
        Ok(())
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }
}

impl Default for RollerConfig {
    fn default() -> Self {
        Self {
            dice_count: DICE_PER_ROLL,
            seed: None,
            strict: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_uses_defaults() {
        let config = RollerConfig::from_json("{}").expect("empty object should parse");
        assert_eq!(config, RollerConfig::default());
        assert_eq!(config.dice_count, 6);
        assert!(!config.strict);
    }

    #[test]
    fn partial_json_overrides_fields() {
        let config = RollerConfig::from_json(r#"{"seed": 17, "strict": true}"#)
            .expect("partial config should parse");
        assert_eq!(config, RollerConfig::default().with_seed(17).strict());
    }

    #[test]
    fn oversized_dice_count_is_rejected() {
        let error = RollerConfig::from_json(r#"{"dice_count": 1000}"#)
            .expect_err("dice_count above limit should fail");
        assert!(matches!(error, DiceError::InvalidConfig { .. }));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let error = RollerConfig::from_json("{dice_count").expect_err("bad json should fail");
        assert!(matches!(error, DiceError::InvalidConfig { .. }));
    }
}
