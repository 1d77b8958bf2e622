use std::env;
use std::path::PathBuf;

pub struct Config {
    pub discord_token: String,
    pub image_dir: PathBuf,
    pub captions_file: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let discord_token = env::var("DISCORD_TOKEN").map_err(|_| "DISCORD_TOKEN must be set")?;

        let image_dir = env::var("IMAGE_DIR").unwrap_or_else(|_| "images".to_string());
        let captions_file =
            env::var("CAPTIONS_FILE").unwrap_or_else(|_| "captions.json".to_string());

        Ok(Self {
            discord_token,
            image_dir: PathBuf::from(image_dir),
            captions_file: PathBuf::from(captions_file),
        })
    }
}
