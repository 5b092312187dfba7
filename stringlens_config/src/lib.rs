mod schema;

pub use schema::{CONFIG_DIR_NAME, Config, LoggingConfig, PORT_ENV, ServerConfig};
