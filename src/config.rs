use std::fs;
use std::io::{self, Write};
use std::path::Path;

use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub discord_token: Option<String>,
    #[serde(default = "default_prefix")]
    pub command_prefix: String,
    pub database_path: Option<String>,
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_prefix() -> String {
    "!".to_string()
}

impl Config {
    const CONFIG_PATH: &'static str = "rolecall.conf";

    pub fn new() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        if Path::new(Self::CONFIG_PATH).exists() {
            let mut config: Config = toml::from_str(&fs::read_to_string(Self::CONFIG_PATH)?)?;
            config.prompt_for_missing_fields()?;
            Ok(config)
        } else {
            Self::initial_setup()
        }
    }

    fn prompt_for_missing_fields(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if self.discord_token.is_none() {
            self.discord_token = Some(Self::prompt_input("Enter your Discord Bot Token: ")?);
        }

        self.save()?;
        Ok(())
    }

    fn initial_setup() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        println!("{}", "Welcome to rolecall! Let's set up your configuration.".bold());
        println!("You'll need a bot token from the Discord Developer Portal.");
        println!("Please follow these steps:");
        println!("1. Go to https://discord.com/developers/applications");
        println!("2. Click 'New Application' and give it a name");
        println!("3. Open the 'Bot' tab and click 'Reset Token' to get your token");
        println!("4. Under 'Privileged Gateway Intents', enable the Message Content and Server Members intents");
        println!("5. Invite the bot to your server with the Manage Roles, Manage Messages and Kick Members permissions");
        println!();

        let discord_token = Self::prompt_input("Enter your Discord Bot Token: ")?;
        let command_prefix = Self::prompt_input("Enter the default command prefix (leave empty for '!'): ")?;

        let config = Config {
            discord_token: Some(discord_token),
            command_prefix: if command_prefix.is_empty() {
                default_prefix()
            } else {
                command_prefix
            },
            database_path: None,
            log_level: LogLevel::default(),
        };

        config.save()?;
        println!("Configuration saved to {}", Self::CONFIG_PATH);

        Ok(config)
    }

    pub fn save(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        fs::write(Self::CONFIG_PATH, toml::to_string(self)?)?;
        Ok(())
    }

    fn prompt_input(prompt: &str) -> Result<String, io::Error> {
        print!("{}", prompt);
        io::stdout().flush()?;
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        Ok(input.trim().to_string())
    }
}
