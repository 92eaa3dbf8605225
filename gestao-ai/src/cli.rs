use clap::{Parser, Subcommand};
use std::path::PathBuf;

use gestao_ai::{
    config::AppConfig, error::AppError, roster::load_roster, service::AnswerService, summarizer,
};

#[derive(Debug, Parser)]
#[command(name = "gestao-ai")]
#[command(about = "Answer questions about a roster of professionals")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Ask a question about the roster
    Ask {
        /// Question in natural language
        question: String,

        /// Roster file (JSON array of professionals)
        #[arg(short, long)]
        roster: PathBuf,
    },

    /// Print the offline team overview
    Stats {
        /// Roster file (JSON array of professionals)
        #[arg(short, long)]
        roster: PathBuf,
    },

    /// Check which configured providers are reachable
    Check,

    /// Inspect or wipe the answer cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum CacheAction {
    /// List cached questions, oldest first
    List,
    /// Remove every cached answer
    Clear,
}

impl Cli {
    pub async fn run(self) -> Result<(), AppError> {
        let config = AppConfig::load(self.config.as_deref())?;

        match self.command {
            Commands::Ask { question, roster } => {
                let roster = load_roster(&roster)?;
                let mut service = AnswerService::create(&config);
                let resolution = service.ask(&question, &roster).await;
                println!("{}", resolution.answer());
                service.dispose()?;
            }
            Commands::Stats { roster } => {
                let roster = load_roster(&roster)?;
                println!("{}", summarizer::overview(&roster));
            }
            Commands::Check => {
                let service = AnswerService::create(&config);
                let statuses = service.check_providers().await;
                if statuses.is_empty() {
                    println!("Nenhum provedor configurado; respostas virão da análise offline.");
                }
                for status in statuses {
                    let state = if status.reachable {
                        "disponível"
                    } else {
                        "indisponível"
                    };
                    println!("{}: {}", status.source, state);
                }
            }
            Commands::Cache { action } => {
                let mut service = AnswerService::create(&config);
                match action {
                    CacheAction::List => {
                        if service.cache().is_empty() {
                            println!("Cache vazio.");
                        }
                        for entry in service.cache().entries() {
                            println!("[{}] {}", entry.timestamp.to_rfc3339(), entry.question);
                        }
                    }
                    CacheAction::Clear => {
                        let removed = service.cache().len();
                        service.clear_cache()?;
                        println!("{} respostas removidas do cache.", removed);
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ask() {
        let cli = Cli::try_parse_from([
            "gestao-ai",
            "--verbose",
            "ask",
            "Quantos sabem React?",
            "--roster",
            "equipe.json",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Ask { question, roster } => {
                assert_eq!(question, "Quantos sabem React?");
                assert_eq!(roster, PathBuf::from("equipe.json"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_cache_clear_with_global_config() {
        let cli =
            Cli::try_parse_from(["gestao-ai", "cache", "clear", "--config", "gestao.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("gestao.toml")));
        assert!(matches!(
            cli.command,
            Commands::Cache {
                action: CacheAction::Clear
            }
        ));
    }

    #[test]
    fn test_ask_requires_roster() {
        assert!(Cli::try_parse_from(["gestao-ai", "ask", "Resumo"]).is_err());
    }
}
