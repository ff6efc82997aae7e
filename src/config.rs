use crate::error::{FieldwatchError, Result};
use dialoguer::{Input, Password};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub location: LocationConfig,
    #[serde(default)]
    pub monitor: MonitorConfig,
    pub policy: PolicyConfig,
    pub slack: Option<SlackConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocationConfig {
    pub latitude: f64,
    pub longitude: f64,
    /// Observation station identifier, e.g. KFDK.
    pub station: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MonitorConfig {
    /// Daytime forecast periods to display.
    #[serde(default = "default_forecast_periods")]
    pub forecast_periods: usize,
    /// Future daytime periods the policy is evaluated against.
    #[serde(default = "default_lookahead_periods")]
    pub lookahead_periods: usize,
}

fn default_forecast_periods() -> usize {
    10
}

fn default_lookahead_periods() -> usize {
    5
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            forecast_periods: default_forecast_periods(),
            lookahead_periods: default_lookahead_periods(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PolicyConfig {
    pub path: PathBuf,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct SlackConfig {
    pub bot_token: String,
    pub user_id: String,
}

impl std::fmt::Debug for SlackConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackConfig")
            .field("bot_token", &"[REDACTED]")
            .field("user_id", &self.user_id)
            .finish()
    }
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(FieldwatchError::Config(format!(
                "Config file not found at {:?}. Run `fieldwatch init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| FieldwatchError::Config(format!("Failed to read config: {}", e)))?;

        // Substitute environment variables
        let config_str = Self::substitute_env_vars(&config_str);

        let config: Config = serde_yaml::from_str(&config_str)
            .map_err(|e| FieldwatchError::Config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        // Try current directory first
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        // Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("fieldwatch").join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        // Return XDG path as the default (will trigger "not found" in load)
        let default_path = dirs::config_dir()
            .ok_or_else(|| FieldwatchError::Config("Cannot determine config directory".into()))?
            .join("fieldwatch")
            .join("config.yaml");
        Ok(default_path)
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/fieldwatch/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| FieldwatchError::Config("Cannot determine config directory".into()))?
            .join("fieldwatch");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("No configuration found. Let's set up fieldwatch!");
        println!();

        // --- Location ---
        println!("Monitored location");
        let latitude: f64 = Input::new()
            .with_prompt("  Latitude")
            .default(39.4143)
            .interact_text()
            .map_err(|e| FieldwatchError::Config(format!("Input error: {}", e)))?;

        let longitude: f64 = Input::new()
            .with_prompt("  Longitude")
            .default(-77.4105)
            .interact_text()
            .map_err(|e| FieldwatchError::Config(format!("Input error: {}", e)))?;

        let station: String = Input::new()
            .with_prompt("  Observation station id")
            .default("KFDK".into())
            .interact_text()
            .map_err(|e| FieldwatchError::Config(format!("Input error: {}", e)))?;

        println!();

        // --- Policy ---
        println!("Policy");
        let policy_path: String = Input::new()
            .with_prompt("  Path to policy.json")
            .default("policy.json".into())
            .interact_text()
            .map_err(|e| FieldwatchError::Config(format!("Input error: {}", e)))?;

        println!();

        // --- Slack (optional) ---
        println!("Slack notifications (leave user id blank to skip)");
        let slack_user: String = Input::new()
            .with_prompt("  User id")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| FieldwatchError::Config(format!("Input error: {}", e)))?;

        let slack = if slack_user.is_empty() {
            None
        } else {
            let token: String = Password::new()
                .with_prompt("  Bot token")
                .allow_empty_password(true)
                .interact()
                .map_err(|e| FieldwatchError::Config(format!("Input error: {}", e)))?;

            Some(SlackConfig {
                bot_token: token,
                user_id: slack_user,
            })
        };

        println!();

        let config = Config {
            location: LocationConfig {
                latitude,
                longitude,
                station,
            },
            monitor: MonitorConfig::default(),
            policy: PolicyConfig {
                path: PathBuf::from(policy_path),
            },
            slack,
        };

        // Write to default config path
        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| FieldwatchError::Config(format!("Failed to serialize config: {}", e)))?;

        // Write with a header comment
        let content = format!(
            "# fieldwatch Configuration\n# Generated by `fieldwatch init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }
}
