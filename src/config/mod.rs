use serde::Deserialize;

/// Complete artifex configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifexConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub auto: AutoGatherConfig,
    #[serde(default)]
    pub roster: RosterConfig,
}

/// Remote API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token; falls back to the ARTIFACTS_TOKEN environment variable
    #[serde(default = "default_token")]
    pub token: String,
}

fn default_base_url() -> String {
    "https://api.artifactsmmo.com".to_string()
}

fn default_token() -> String {
    std::env::var("ARTIFACTS_TOKEN").unwrap_or_default()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: default_token(),
        }
    }
}

/// Per-character clock configuration.
///
/// The countdown tick period and the seconds removed per tick are independent
/// knobs; the reference pacing is one second removed every two seconds of
/// wall clock.
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    /// How often to re-fetch a character's position (milliseconds)
    #[serde(default = "default_position_refresh_ms")]
    pub position_refresh_ms: u64,
    /// How often the countdown clock fires (milliseconds)
    #[serde(default = "default_cooldown_tick_ms")]
    pub cooldown_tick_ms: u64,
    /// Seconds removed from the remaining cooldown per tick
    #[serde(default = "default_cooldown_decrement_seconds")]
    pub cooldown_decrement_seconds: u32,
}

fn default_position_refresh_ms() -> u64 {
    1000
}

fn default_cooldown_tick_ms() -> u64 {
    2000
}

fn default_cooldown_decrement_seconds() -> u32 {
    1
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            position_refresh_ms: default_position_refresh_ms(),
            cooldown_tick_ms: default_cooldown_tick_ms(),
            cooldown_decrement_seconds: default_cooldown_decrement_seconds(),
        }
    }
}

/// Auto-gather supervisor configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AutoGatherConfig {
    /// Delay between gathers when no cooldown information is available
    /// (milliseconds); prevents a tight loop
    #[serde(default = "default_fallback_delay_ms")]
    pub fallback_delay_ms: u64,
}

fn default_fallback_delay_ms() -> u64 {
    1000
}

impl Default for AutoGatherConfig {
    fn default() -> Self {
        Self {
            fallback_delay_ms: default_fallback_delay_ms(),
        }
    }
}

/// Roster seed configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RosterConfig {
    /// Characters created at startup so the UI has something to show before
    /// (or without) a successful roster fetch
    #[serde(default = "default_demo_characters")]
    pub demo_characters: Vec<DemoCharacter>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DemoCharacter {
    pub name: String,
    pub level: i32,
    pub x: i32,
    pub y: i32,
}

fn default_demo_characters() -> Vec<DemoCharacter> {
    vec![
        DemoCharacter {
            name: "pancake".to_string(),
            level: 10,
            x: 100,
            y: 200,
        },
        DemoCharacter {
            name: "Izzy".to_string(),
            level: 15,
            x: 150,
            y: 250,
        },
        DemoCharacter {
            name: "Goober".to_string(),
            level: 20,
            x: 200,
            y: 300,
        },
    ]
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            demo_characters: default_demo_characters(),
        }
    }
}

impl Default for ArtifexConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            scheduler: SchedulerConfig::default(),
            auto: AutoGatherConfig::default(),
            roster: RosterConfig::default(),
        }
    }
}

/// Load configuration from TOML file
pub fn load_config(path: &str) -> Result<ArtifexConfig, Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)?;
    let config: ArtifexConfig = toml::from_str(&contents)?;
    Ok(config)
}
