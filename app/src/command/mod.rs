//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy type with its own input type, so
//! dispatch is resolved at compile time.

mod info;
mod init;
mod parse;
mod serve;
mod version;

pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use parse::{ParseInput, ParseStrategy};
pub use serve::{ServeInput, ServeStrategy};
pub use version::VersionStrategy;

/// Contract shared by all command strategies.
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}
