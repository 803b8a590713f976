//! Stack channel example
//!
//! Loads a JSON configuration with a stack channel fanning out to a daily
//! file and to standard error, and observes writes through an event
//! dispatcher.
//!
//! Run with: cargo run --example stack_channels

use rust_log_facade::prelude::*;
use serde_json::Value;

fn main() -> Result<()> {
    println!("=== Rust Log Facade - Stack Channels Example ===\n");

    let storage = std::env::temp_dir().join("rust_log_facade_demo");
    let mut config = LoggingConfig::from_json_str(
        r#"{
            "default": "stack",
            "level": "debug",
            "console_mirror": "always",
            "channels": {
                "stack": { "driver": "stack", "channels": ["daily", "errors"] },
                "daily": { "driver": "daily", "days": 7, "level": "info" },
                "errors": { "driver": "stderr", "level": "error" }
            }
        }"#,
    )?;
    config.storage_path = Some(storage.clone());

    let logger = Logger::builder()
        .config(config)
        .dispatcher(|event: &str, payload: &Value| -> Result<()> {
            if event == WRITTEN_EVENT {
                println!("   observed {} on {}", payload["level"], payload["channel"]);
            }
            Ok(())
        })
        .build();

    println!("1. Writes fan out to every member whose level allows them:");
    logger.debug("Dropped by both members");
    logger.info("Daily file only");
    logger.error("Daily file and stderr");

    let stack = logger.get("stack")?;
    println!("\n2. The stack reuses its members' writers:");
    for writer in stack.writers() {
        println!("   {} (min level {})", writer.appender_name(), writer.min_level());
    }

    logger.flush()?;
    println!("\nLog files written under {}", storage.join("logs").display());
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
