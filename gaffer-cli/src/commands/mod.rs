//! Subcommand implementations.
//!
//! Every command returns `Result<(), String>`; `main` prints the error and
//! sets the exit code.

pub mod ask;
pub mod chat;
pub mod config;
pub mod eval;
pub mod extract;

use std::path::PathBuf;

use clap::Args;
use gaffer::kb::{InMemoryKnowledgeBase, WikidataClient};
use gaffer::{Config, KnowledgeBase, Pipeline};

/// Knowledge base chosen at runtime.
pub type DynPipeline = Pipeline<Box<dyn KnowledgeBase>>;

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Config file (default: <config dir>/gaffer/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Use a local JSON knowledge base instead of Wikidata
    #[arg(long, global = true, value_name = "PATH")]
    pub kb_file: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl GlobalArgs {
    /// Effective configuration.
    pub fn load_config(&self) -> Result<Config, String> {
        Config::load(self.config.as_deref()).map_err(|e| e.to_string())
    }

    /// Build the pipeline: gazetteer from the knowledge base's club list.
    pub fn pipeline(&self, config: &Config) -> Result<DynPipeline, String> {
        match &self.kb_file {
            Some(path) => {
                let kb = InMemoryKnowledgeBase::from_path(path)
                    .map_err(|e| format!("Failed to load {}: {}", path.display(), e))?;
                Pipeline::from_source(&kb, Box::new(kb.clone()) as Box<dyn KnowledgeBase>, config)
                    .map_err(|e| e.to_string())
            }
            None => {
                let client = WikidataClient::new(config.wikidata.clone());
                Pipeline::from_source(&client, Box::new(client.clone()) as Box<dyn KnowledgeBase>, config)
                    .map_err(|e| format!("Failed to load club list: {}", e))
            }
        }
    }
}
