use storygate::{
    arguments::{patterns, print_debug_info, print_help},
    config,
    logger::{self, LogTag},
    paths, telegram, webserver,
};

/// Main entry point for StoryGate
///
/// Startup order matters: directories before the logger (the logger
/// needs the logs directory), config before the Telegram client, and
/// the Telegram connect before the webserver so the first request does
/// not pay the handshake.
#[tokio::main]
async fn main() {
    // Ensure all directories exist BEFORE logger initialization
    if let Err(e) = paths::ensure_all_directories() {
        eprintln!("Failed to create required directories: {}", e);
        std::process::exit(1);
    }

    // Initialize logger system (now safe to create log files)
    logger::init();

    // Check for help/version requests first (before any other processing)
    if patterns::is_help_requested() {
        print_help();
        std::process::exit(0);
    }
    if patterns::is_version_requested() {
        println!("storygate {}", env!("CARGO_PKG_VERSION"));
        std::process::exit(0);
    }

    logger::info(LogTag::System, "StoryGate starting up...");

    // Print debug information if any debug modes are enabled
    print_debug_info();

    // Load config (creates a default file on first run)
    match config::init_config() {
        Ok(loaded) => {
            if let Err(e) = loaded.validate() {
                logger::error(LogTag::Config, &format!("Invalid configuration: {}", e));
                logger::error(
                    LogTag::Config,
                    &format!(
                        "Edit {} or set API_ID / API_HASH / SESSION_STRING",
                        paths::get_config_path().display()
                    ),
                );
                std::process::exit(1);
            }
        }
        Err(e) => {
            logger::error(LogTag::Config, &format!("Failed to load config: {}", e));
            std::process::exit(1);
        }
    }

    // Eager Telegram connect; a failure here is a warning, not fatal.
    // Requests retry the connect and report the error in their envelope.
    match telegram::get_client().await {
        Ok(_) => logger::info(LogTag::Telegram, "Telegram client connected"),
        Err(e) => logger::warning(
            LogTag::Telegram,
            &format!("Telegram connect failed at startup: {}", e),
        ),
    }

    // Ctrl-C triggers the graceful shutdown path
    tokio::spawn(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            logger::info(LogTag::System, "Shutdown requested, stopping...");
            webserver::shutdown();
        }
    });

    // Blocks until shutdown
    if let Err(e) = webserver::start_server().await {
        logger::error(LogTag::Webserver, &format!("Webserver failed: {}", e));
        telegram::shutdown_client().await;
        logger::flush();
        std::process::exit(1);
    }

    telegram::shutdown_client().await;
    logger::info(LogTag::System, "StoryGate stopped");
    logger::flush();
}
