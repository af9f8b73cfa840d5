use std::io;
use std::path::Path;
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use app_lib::commands::language::{list_languages, pick_language, set_language, show_current};
use app_lib::config::config::{
    get_config_file_path, read_config_from, Config, HeuristicsMode, WriteMode,
};
use app_lib::core::client::context::AppContext;
use app_lib::core::client::host::SystemHost;
use app_lib::core::client::prompt::{ConsolePrompter, DialogPrompter, Prompter, StdinLines};
use app_lib::result::CoreResult;
use app_lib::utils::app_info;
use app_lib::utils::file_ops::create_initial_directories;
use app_lib::utils::logger::init_logging;
use app_lib::utils::system_info::describe_system;
use app_lib::{exit_code_for, show_windows_error};

#[derive(Parser)]
#[command(name = "league-language-changer")]
#[command(version)]
#[command(about = "Change the display language of the League of Legends client")]
struct Cli {
    /// Use terminal prompts instead of native dialogs
    #[arg(long)]
    console: bool,

    /// Skip the desktop shortcut and drive scan, go straight to folder selection
    #[arg(long)]
    no_heuristics: bool,

    /// Write the settings file through a temporary file and rename
    #[arg(long)]
    atomic: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the supported languages
    List,

    /// Show the language currently configured in the client
    Show,

    /// Set the client language by tag (de_DE) or name (Deutsch)
    Set {
        #[arg(value_name = "LANGUAGE")]
        language: String,
    },
}

fn apply_overrides(cli: &Cli, config: &mut Config) {
    if cli.console {
        config.launcher.console = true;
    }
    if cli.no_heuristics {
        config.discovery.heuristics = HeuristicsMode::Disabled;
    }
    if cli.atomic {
        config.settings.write_mode = WriteMode::Atomic;
    }
    if cli.debug {
        config.launcher.debug = true;
    }
}

/// 读取配置文件并应用命令行覆盖
fn load_config(config_file: &Path, cli: &Cli) -> anyhow::Result<Config> {
    let mut config = read_config_from(config_file)
        .with_context(|| format!("Failed to read config {}", config_file.display()))?;
    apply_overrides(cli, &mut config);
    Ok(config)
}

fn run(ctx: &mut AppContext, command: Option<Commands>) -> CoreResult<()> {
    let mut stdout = io::stdout();
    match command {
        Some(Commands::List) => list_languages(&mut stdout, None)?,
        Some(Commands::Show) => show_current(ctx, &mut stdout)?,
        Some(Commands::Set { language }) => {
            set_language(ctx, &language)?;
        }
        None => {
            if pick_language(ctx, &mut StdinLines, &mut stdout)?.is_none() {
                info!("No language selected.");
            }
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    create_initial_directories();

    // 读取配置文件
    let config = match load_config(&get_config_file_path(), &cli) {
        Ok(c) => c,
        Err(e) => {
            let msg = format!("{:#}\nThe program will exit.", e);
            eprintln!("{}", msg);
            show_windows_error("Startup failed - config", &msg);
            process::exit(1);
        }
    };

    init_logging(config.launcher.debug);

    info!(
        "{} {} ({}) start | {}",
        app_info::get_name(),
        app_info::get_version(),
        app_info::get_license(),
        app_info::get_build_info().replace('\n', " | ")
    );
    info!("{}", describe_system());
    info!(
        "Discovery: {:?} | On abandon: {:?} | Write mode: {:?}",
        config.discovery.heuristics, config.discovery.on_abandon, config.settings.write_mode
    );

    let policy = config.discovery.on_abandon;
    let prompter: Box<dyn Prompter> = if config.launcher.console {
        Box::new(ConsolePrompter::stdio())
    } else {
        Box::new(DialogPrompter)
    };
    let mut ctx = AppContext::new(config, Box::new(SystemHost), prompter);

    match run(&mut ctx, cli.command) {
        Ok(()) => {
            info!("Program exited normally.");
            process::exit(0);
        }
        Err(e) => {
            let code = exit_code_for(&e, policy);
            if code != 0 {
                ctx.prompter().show_error("Error", &e.to_string());
            }
            process::exit(code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        let cli = Cli::parse_from(["league-language-changer", "--atomic", "--no-heuristics", "show"]);

        let config = load_config(&path, &cli).unwrap();
        assert_eq!(config.settings.write_mode, WriteMode::Atomic);
        assert_eq!(config.discovery.heuristics, HeuristicsMode::Disabled);
        assert!(!config.launcher.console);
        assert!(matches!(cli.command, Some(Commands::Show)));
    }

    #[test]
    fn test_config_error_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        // 父路径是普通文件，无法创建配置目录
        let blocker = dir.path().join("config");
        fs::write(&blocker, "").unwrap();
        let path = blocker.join("settings.toml");
        let cli = Cli::parse_from(["league-language-changer"]);

        let err = load_config(&path, &cli).unwrap_err();
        let msg = format!("{:#}", err);
        assert!(msg.starts_with("Failed to read config"), "{}", msg);
        assert!(msg.contains("settings.toml"), "{}", msg);
        assert!(err.downcast_ref::<app_lib::result::CoreError>().is_some());
    }
}
