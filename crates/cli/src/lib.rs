pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use agentscout_core::config::{AppConfig, ConfigOverrides, LoadOptions};
use commands::CommandResult;

#[derive(Debug, Parser)]
#[command(
    name = "agentscout",
    about = "Agentscout matching CLI",
    long_about = "Match free-text problem descriptions against the agent catalog, recommend tech stacks, and generate refined prompts.",
    after_help = "Examples:\n  agentscout match \"build a saas dashboard\" --stack\n  agentscout refine \"write a launch post\" --agent jasper --answer writing_tone=professional\n  agentscout history list"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to a config file (TOML)")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Override the data directory")]
    data_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Rank catalog agents against a free-text problem description")]
    Match {
        query: String,
        #[arg(long, help = "Also recommend a technology stack for build queries")]
        stack: bool,
    },
    #[command(about = "Recommend a technology stack for a build-intent query")]
    Stack { query: String },
    #[command(about = "Generate the optimized prompt for a chosen agent")]
    Prompt {
        query: String,
        #[arg(long, help = "Catalog agent id")]
        agent: String,
    },
    #[command(about = "Print the refinement question bank for a chosen agent")]
    Questions {
        #[arg(long, help = "Catalog agent id")]
        agent: String,
    },
    #[command(about = "Answer refinement questions non-interactively and generate the custom prompt")]
    Refine {
        query: String,
        #[arg(long, help = "Catalog agent id")]
        agent: String,
        #[arg(
            long = "answer",
            value_name = "QUESTION=VALUE",
            help = "Toggle one answer value; repeatable"
        )]
        answers: Vec<String>,
        #[arg(long, value_name = "TITLE", help = "Save the generated prompt as a template")]
        save: Option<String>,
    },
    #[command(about = "Inspect or clear stored search history")]
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
    #[command(about = "Add or list agent reviews")]
    Review {
        #[command(subcommand)]
        action: ReviewAction,
    },
    #[command(about = "Manage saved prompt templates")]
    Template {
        #[command(subcommand)]
        action: TemplateAction,
    },
}

#[derive(Debug, Subcommand)]
enum HistoryAction {
    #[command(about = "List stored searches, newest first")]
    List,
    #[command(about = "Delete all stored searches")]
    Clear,
}

#[derive(Debug, Subcommand)]
enum ReviewAction {
    #[command(about = "Add a review for an agent")]
    Add {
        #[arg(long, help = "Catalog agent id")]
        agent: String,
        #[arg(long, help = "Whole-star rating from 1 to 5")]
        rating: i64,
        #[arg(long, help = "Review text, 3 to 300 characters")]
        text: String,
    },
    #[command(about = "List reviews for an agent, newest first")]
    List {
        #[arg(long, help = "Catalog agent id")]
        agent: String,
    },
}

#[derive(Debug, Subcommand)]
enum TemplateAction {
    #[command(about = "List saved prompt templates, newest first")]
    List,
    #[command(about = "Delete one template by id")]
    Remove { id: String },
    #[command(about = "Delete all saved templates")]
    Clear,
}

fn init_logging(config: &AppConfig) {
    use agentscout_core::config::LogFormat::{Compact, Json, Pretty};
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt()
                .with_target(false)
                .with_max_level(log_level)
                .with_writer(std::io::stderr)
                .compact()
                .init();
        }
        Pretty => {
            tracing_subscriber::fmt()
                .with_target(false)
                .with_max_level(log_level)
                .with_writer(std::io::stderr)
                .pretty()
                .init();
        }
        Json => {
            tracing_subscriber::fmt()
                .with_target(false)
                .with_max_level(log_level)
                .with_writer(std::io::stderr)
                .json()
                .init();
        }
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let load_options = LoadOptions {
        config_path: cli.config.clone(),
        require_file: cli.config.is_some(),
        overrides: ConfigOverrides { data_dir: cli.data_dir.clone(), ..ConfigOverrides::default() },
    };

    let config = match AppConfig::load(load_options) {
        Ok(config) => config,
        Err(error) => {
            let result = CommandResult::failure("config", "configuration", error.to_string(), 1);
            println!("{}", result.output);
            return ExitCode::from(result.exit_code);
        }
    };

    init_logging(&config);

    let result = match cli.command {
        Command::Match { query, stack } => commands::matching::run(&config, &query, stack),
        Command::Stack { query } => commands::stack::run(&query),
        Command::Prompt { query, agent } => commands::prompt::run(&query, &agent),
        Command::Questions { agent } => commands::questions::run(&agent),
        Command::Refine { query, agent, answers, save } => {
            commands::refine::run(&config, &query, &agent, &answers, save.as_deref())
        }
        Command::History { action } => match action {
            HistoryAction::List => commands::history::list(&config),
            HistoryAction::Clear => commands::history::clear(&config),
        },
        Command::Review { action } => match action {
            ReviewAction::Add { agent, rating, text } => {
                commands::review::add(&config, &agent, rating, &text)
            }
            ReviewAction::List { agent } => commands::review::list(&config, &agent),
        },
        Command::Template { action } => match action {
            TemplateAction::List => commands::template::list(&config),
            TemplateAction::Remove { id } => commands::template::remove(&config, &id),
            TemplateAction::Clear => commands::template::clear(&config),
        },
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, Command, HistoryAction};

    #[test]
    fn parses_match_with_stack_flag() {
        let cli = Cli::parse_from(["agentscout", "match", "build a saas dashboard", "--stack"]);
        assert!(matches!(
            cli.command,
            Command::Match { ref query, stack: true } if query == "build a saas dashboard"
        ));
    }

    #[test]
    fn parses_repeated_answers() {
        let cli = Cli::parse_from([
            "agentscout",
            "refine",
            "write a post",
            "--agent",
            "jasper",
            "--answer",
            "writing_tone=professional",
            "--answer",
            "output_pref=steps",
        ]);
        let Command::Refine { answers, agent, .. } = cli.command else {
            unreachable!("refine command parses");
        };
        assert_eq!(agent, "jasper");
        assert_eq!(answers, ["writing_tone=professional", "output_pref=steps"]);
    }

    #[test]
    fn parses_history_subcommands() {
        let list = Cli::parse_from(["agentscout", "history", "list"]);
        assert!(matches!(list.command, Command::History { action: HistoryAction::List }));

        let clear = Cli::parse_from(["agentscout", "history", "clear"]);
        assert!(matches!(clear.command, Command::History { action: HistoryAction::Clear }));
    }

    #[test]
    fn parses_global_data_dir_override() {
        let cli =
            Cli::parse_from(["agentscout", "--data-dir", "/tmp/scout", "history", "list"]);
        assert_eq!(cli.data_dir.as_deref(), Some(std::path::Path::new("/tmp/scout")));
    }
}
