// src/utils/progress_config.rs

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::env;

/// Configuration for the progress bar shown while indexing activities
#[derive(Debug, Clone)]
pub struct ProgressConfig {
    /// Whether to show a progress bar at all
    pub enabled: bool,
    /// Refresh rate for the progress bar in milliseconds
    pub refresh_rate_ms: u64,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            refresh_rate_ms: 100,
        }
    }
}

impl ProgressConfig {
    /// Create progress configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            enabled: env::var("PROGRESS_ENABLED")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .unwrap_or(true),
            refresh_rate_ms: env::var("PROGRESS_REFRESH_RATE_MS")
                .unwrap_or_else(|_| "100".to_string())
                .parse()
                .unwrap_or(100),
        }
    }

    /// Create a stderr progress bar of `len` steps if progress is enabled, None otherwise
    pub fn create_bar(&self, len: u64, message: &str) -> Option<ProgressBar> {
        if !self.enabled {
            return None;
        }
        let refresh_hz = (1000 / self.refresh_rate_ms.max(1)).clamp(1, 20) as u8;
        let pb = ProgressBar::with_draw_target(
            Some(len),
            ProgressDrawTarget::stderr_with_hz(refresh_hz),
        );
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("█▉▊▋▌▍▎▏  "));
        }
        pb.set_message(message.to_string());
        Some(pb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_default_config() {
        let config = ProgressConfig::default();
        assert!(config.enabled);
        assert_eq!(config.refresh_rate_ms, 100);
    }

    #[test]
    fn test_env_config() {
        env::set_var("PROGRESS_ENABLED", "false");
        env::set_var("PROGRESS_REFRESH_RATE_MS", "not-a-number");

        let config = ProgressConfig::from_env();
        assert!(!config.enabled);
        assert_eq!(config.refresh_rate_ms, 100);

        // Clean up
        env::remove_var("PROGRESS_ENABLED");
        env::remove_var("PROGRESS_REFRESH_RATE_MS");
    }

    #[test]
    fn test_bar_creation() {
        let mut config = ProgressConfig::default();
        config.refresh_rate_ms = 0;
        assert!(config.create_bar(10, "Indexing").is_some());

        config.enabled = false;
        assert!(config.create_bar(10, "Indexing").is_none());
    }
}
