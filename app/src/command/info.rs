use stringlens_config::{Config, PORT_ENV};
use stringlens_query::{GroupMode, QueryParser};

/// Strategy for displaying configuration and the natural-language rule table.
///
/// This strategy outputs:
/// - Config file location and whether it exists
/// - Server bind address and logging level
/// - Every query rule group, in evaluation order, with its patterns
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = Config;

    async fn execute(&self, config: Self::Input) -> anyhow::Result<()> {
        println!("=== stringlens Configuration ===\n");

        let path = Config::config_path()?;
        let status = if path.exists() { "found" } else { "not found, using defaults" };
        println!("Config File:");
        println!("  Path: {} ({status})", path.display());
        println!();

        println!("Server:");
        println!("  Bind Address: {}", config.server.bind_addr());
        if let Ok(port) = std::env::var(PORT_ENV) {
            println!("  ${PORT_ENV}: {port}");
        }
        println!();

        println!("Logging:");
        println!("  Level: {}", config.logging.level);
        if let Ok(filter) = std::env::var("RUST_LOG") {
            println!("  RUST_LOG: {filter}");
        }
        println!();

        println!("Query Rules (evaluation order):");
        let parser = QueryParser::with_defaults()?;
        for group in parser.groups() {
            println!("  {} [{}]", group.name, format_mode(group.mode));
            for rule in &group.rules {
                println!(
                    "    {:<16} {:<20} {}",
                    rule.id,
                    rule.field.as_str(),
                    rule.pattern()
                );
            }
        }

        Ok(())
    }
}

const fn format_mode(mode: GroupMode) -> &'static str {
    match mode {
        GroupMode::FirstMatch => "first match wins",
        GroupMode::Every => "every rule, last write wins",
    }
}
