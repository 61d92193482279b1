use std::env;

/// Tuning for the greedy engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Safety margin (>= 1) applied to the remaining item volume when picking
    /// a new container.
    pub empty_space_ratio: f64,
}

impl SolverConfig {
    pub const DEFAULT_EMPTY_SPACE_RATIO: f64 = 1.1;
    const EMPTY_SPACE_RATIO_VAR: &'static str = "BOX_PACKER_EMPTY_SPACE_RATIO";

    pub fn new(empty_space_ratio: f64) -> Self {
        Self { empty_space_ratio }
    }

    /// Reads overrides from the environment, falling back to defaults on
    /// missing or unusable values.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = Self::EMPTY_SPACE_RATIO_VAR;
        let empty_space_ratio = match lookup(var).map(|v| v.trim().to_owned()) {
            None => Self::DEFAULT_EMPTY_SPACE_RATIO,
            Some(raw) if raw.is_empty() => Self::DEFAULT_EMPTY_SPACE_RATIO,
            Some(raw) => match raw.parse::<f64>() {
                Ok(value) if value.is_finite() && value >= 1.0 => value,
                Ok(value) => {
                    tracing::warn!(
                        var,
                        value,
                        "empty space ratio must be at least 1, using {}",
                        Self::DEFAULT_EMPTY_SPACE_RATIO
                    );
                    Self::DEFAULT_EMPTY_SPACE_RATIO
                }
                Err(err) => {
                    tracing::warn!(
                        var,
                        raw = %raw,
                        %err,
                        "could not parse empty space ratio, using {}",
                        Self::DEFAULT_EMPTY_SPACE_RATIO
                    );
                    Self::DEFAULT_EMPTY_SPACE_RATIO
                }
            },
        };
        Self { empty_space_ratio }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_EMPTY_SPACE_RATIO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(value: Option<&'static str>) -> impl Fn(&str) -> Option<String> {
        move |_| value.map(str::to_owned)
    }

    #[test]
    fn test_default_when_unset() {
        let config = SolverConfig::from_lookup(lookup(None));
        assert_eq!(config, SolverConfig::default());
    }

    #[test]
    fn test_reads_valid_value() {
        let config = SolverConfig::from_lookup(lookup(Some(" 1.25 ")));
        assert!((config.empty_space_ratio - 1.25).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_invalid_values() {
        for raw in ["0.5", "abc", "NaN", "inf", ""] {
            let config = SolverConfig::from_lookup(lookup(Some(raw)));
            assert_eq!(config, SolverConfig::default(), "{raw}");
        }
    }
}
