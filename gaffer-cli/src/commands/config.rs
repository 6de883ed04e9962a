//! Config command - show the effective configuration

use clap::Parser;
use gaffer::config::default_config_path;

use super::GlobalArgs;

/// Print the effective configuration as TOML
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Print the default config file location instead
    #[arg(long)]
    pub path: bool,
}

pub fn run(args: ConfigArgs, global: &GlobalArgs) -> Result<(), String> {
    if args.path {
        let path = default_config_path().ok_or("No config directory on this platform")?;
        println!("{}", path.display());
        return Ok(());
    }
    let config = global.load_config()?;
    print!("{}", config.to_toml().map_err(|e| e.to_string())?);
    Ok(())
}
