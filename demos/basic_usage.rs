//! Basic facade usage example
//!
//! Demonstrates writing to the default channel, level filtering and channel
//! selection, with every channel writing to standard error.
//!
//! Run with: cargo run --example basic_usage

use rust_log_facade::prelude::*;
use rust_log_facade::info;

fn main() -> Result<()> {
    println!("=== Rust Log Facade - Basic Usage Example ===\n");

    let config = LoggingConfig::new()
        .with_default("app")
        .with_level("debug")
        .with_console_mirror(ConsoleMirror::Never)
        .with_channel("app", ChannelConfig::stderr())
        .with_channel("quiet", ChannelConfig::stderr().with_level("warning"));
    let logger = Logger::new(config);

    println!("1. Logging at different levels:");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.notice("This is a notice message");
    logger.warning("This is a warning message");
    logger.error("This is an error message");
    logger.critical("This is a critical message");
    logger.alert("This is an alert message");
    logger.emergency("This is an emergency message");

    println!("\n2. Level names are normalized, unknown names become DEBUG:");
    logger.log("WARNING", "Upper-case level name");
    logger.log("verbose", "Unknown level name");

    println!("\n3. Selecting a channel with a WARNING threshold:");
    logger.channel("quiet")?;
    logger.info("Info message (hidden)");
    logger.warning("Warning message (visible)");

    println!("\n4. Structured context and formatting macros:");
    logger.write(
        "info",
        "User logged in",
        LogContext::new().with_field("user_id", 42).with_field("ip", "10.0.0.7"),
        Some("app"),
    )?;
    info!(logger, "Processed {} items in {} ms", 128, 35);

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
