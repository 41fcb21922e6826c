//! Messages between the caller and the sim loop thread.

use skylink_core::commands::Command;

/// Commands sent to the sim loop thread.
#[derive(Debug, Clone, PartialEq)]
pub enum LoopCommand {
    /// Forward to the engine, applied at the next tick boundary.
    Command(Command),
    /// Shut the engine down and end the thread.
    Shutdown,
}

impl From<Command> for LoopCommand {
    fn from(command: Command) -> Self {
        LoopCommand::Command(command)
    }
}
