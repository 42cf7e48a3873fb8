use std::sync::OnceLock;

/// Default minimal number of recognition iterations
pub const DEFAULT_MIN_ITERATIONS: u32 = 16;
/// Default maximal number of recognition iterations
pub const DEFAULT_MAX_ITERATIONS: u32 = 512;

fn parse_env_u32(name: &str, default: u32) -> u32 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(default)
}

static MIN_ITERATIONS: OnceLock<u32> = OnceLock::new();

pub(crate) fn min_iterations() -> u32 {
    *MIN_ITERATIONS.get_or_init(|| parse_env_u32("ITF_MIN_ITERATIONS", DEFAULT_MIN_ITERATIONS).max(1))
}

static MAX_ITERATIONS: OnceLock<u32> = OnceLock::new();

pub(crate) fn max_iterations() -> u32 {
    *MAX_ITERATIONS.get_or_init(|| {
        parse_env_u32("ITF_MAX_ITERATIONS", DEFAULT_MAX_ITERATIONS).max(min_iterations())
    })
}

/// Iteration budget of a recognize call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecognizerConfig {
    /// Iterations always performed, even after an early success
    pub min_iterations: u32,
    /// Hard cap on iterations while no vote has been cast
    pub max_iterations: u32,
}

impl RecognizerConfig {
    /// Budget with explicit bounds, clamped to `1 <= min <= max`
    pub fn new(min_iterations: u32, max_iterations: u32) -> Self {
        let min_iterations = min_iterations.max(1);
        Self {
            min_iterations,
            max_iterations: max_iterations.max(min_iterations),
        }
    }

    /// Budget from `ITF_MIN_ITERATIONS` / `ITF_MAX_ITERATIONS`, or 16 / 512
    pub fn from_env() -> Self {
        Self::new(min_iterations(), max_iterations())
    }
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_clamps() {
        let config = RecognizerConfig::new(0, 0);
        assert_eq!(config.min_iterations, 1);
        assert_eq!(config.max_iterations, 1);

        let config = RecognizerConfig::new(20, 4);
        assert_eq!(config.max_iterations, 20);
    }

    #[test]
    fn test_default_is_valid() {
        let config = RecognizerConfig::default();
        assert!(config.min_iterations >= 1);
        assert!(config.min_iterations <= config.max_iterations);
    }
}
