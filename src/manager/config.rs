// Configuration operations

use crate::cli::ConfigCommands;
use crate::config::Config;
use crate::utils;
use crate::utils::error::AppResult;

pub fn handle_config_command(mut config: Config, command: Option<ConfigCommands>) -> AppResult<()> {
    match command {
        Some(ConfigCommands::Show) => handle_show_command(&config),
        Some(ConfigCommands::Path) => handle_path_command(),
        Some(ConfigCommands::Reset) => handle_reset_command(&mut config),
        None => handle_config_help(),
    }
}

fn handle_show_command(config: &Config) -> AppResult<()> {
    println!("⚙️  Edusched Configuration");
    println!("========================");

    println!("General:");
    println!("  Role: {}", config.general.role);
    if config.general.context.is_empty() {
        println!(
            "  Context: {} (role default)",
            config.general.role.default_context()
        );
    } else {
        println!("  Context: {}", config.general.context);
    }
    println!("  Color: {}", config.general.color);
    match &config.general.fixtures {
        Some(path) => println!("  Fixtures: {}", path.display()),
        None => println!("  Fixtures: built-in"),
    }

    println!("Timing:");
    println!("  Notification: {} ms", config.timing.notification_ms);
    println!("  Simulated latency: {} ms", config.timing.latency_ms);

    Ok(())
}

fn handle_config_help() -> AppResult<()> {
    println!("⚙️  Configuration Management");
    println!("==========================");
    println!("Available configuration commands:");
    println!("  edusched config show    - Show current configuration");
    println!("  edusched config path    - Print the configuration file location");
    println!("  edusched config reset   - Reset configuration to defaults");
    println!();
    println!(
        "Configuration file location: {}",
        Config::config_file_path().display()
    );
    Ok(())
}

fn handle_path_command() -> AppResult<()> {
    println!("{}", Config::config_file_path().display());
    Ok(())
}

fn handle_reset_command(config: &mut Config) -> AppResult<()> {
    if utils::prompt_yes_no(
        "Are you sure you want to reset configuration to defaults? This will overwrite your current settings.",
    )? {
        *config = Config::default();
        config.save()?;
        println!("✓ Configuration reset to defaults!");
    } else {
        println!("Reset cancelled.");
    }
    Ok(())
}
