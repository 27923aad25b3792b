// src/common/dev_mode.rs
//! Development mode configuration
//! Lets the API run without a Clerk instance by accepting every user request
//! as a fixed dev identity.

use std::env;

#[derive(Debug, Clone)]
pub struct DevModeConfig {
    pub enabled: bool,
    pub user_id: String,
    pub user_email: String,
    pub user_name: String,
}

impl DevModeConfig {
    pub fn from_env() -> Self {
        let enabled = env::var("DEV_MODE")
            .unwrap_or_else(|_| "false".to_string())
            .to_lowercase()
            == "true";

        let user_id = env::var("DEV_USER_ID").unwrap_or_else(|_| "user_dev_0000000001".to_string());
        let user_email = env::var("DEV_USER_EMAIL").unwrap_or_else(|_| "dev@test.com".to_string());
        let user_name = env::var("DEV_USER_NAME").unwrap_or_else(|_| "Dev User".to_string());

        Self {
            enabled,
            user_id,
            user_email,
            user_name,
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            user_id: String::new(),
            user_email: String::new(),
            user_name: String::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Print dev mode status on startup
pub fn print_dev_mode_status(config: &DevModeConfig) {
    if config.enabled {
        println!("⚠️  🔓 DEV MODE ENABLED 🔓 ⚠️");
        println!("   Clerk token verification bypassed");
        println!(
            "   Dev User: {} ({}, {})",
            config.user_name, config.user_email, config.user_id
        );
        println!("   ⚠️  DO NOT USE IN PRODUCTION ⚠️");
        println!();
    } else {
        println!("🔒 Production mode - Clerk session tokens required");
    }
}

/// CLI argument parsing for dev mode
pub fn parse_dev_mode_args<I>(args: I) -> Option<bool>
where
    I: IntoIterator<Item = String>,
{
    let mut result = None;
    for arg in args {
        match arg.as_str() {
            "--dev" | "--dev-mode" => result = Some(true),
            "--no-dev" | "--prod" | "--production" => result = Some(false),
            _ => {}
        }
    }
    result
}

/// Override dev mode from CLI args
pub fn apply_cli_override(mut config: DevModeConfig) -> DevModeConfig {
    if let Some(cli_dev_mode) = parse_dev_mode_args(env::args()) {
        println!("🔧 CLI override: DEV_MODE = {}", cli_dev_mode);
        config.enabled = cli_dev_mode;
    }

    config
}
