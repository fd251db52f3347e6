pub mod encipher;
pub mod score;
pub mod solve;
pub mod train;

use clap::Args;
use std::fs;
use std::io::{self, Read};
use subforge::error::SfResult;
use tracing::info;

/// Where the message comes from: a file, an inline string, or stdin.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    #[arg(short, long, conflicts_with = "text")]
    pub input: Option<String>,

    #[arg(long)]
    pub text: Option<String>,
}

impl InputArgs {
    pub fn read(&self) -> SfResult<String> {
        if let Some(text) = &self.text {
            return Ok(text.clone());
        }
        if let Some(path) = &self.input {
            info!("📂 Reading message from: {}", path);
            return Ok(fs::read_to_string(path)?);
        }
        info!("📥 Reading message from stdin");
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    }
}
