use tracing::debug;

use crate::Presenter;

/// Slash commands that toggle the result window.
pub const TOGGLE_COMMANDS: [&str; 2] = ["/squadronista", "/squad"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    Toggled { open: bool },
    NotHandled,
}

/// Routes chat commands to the presenter. Arguments after the command word
/// are accepted and ignored.
#[derive(Clone, Debug)]
pub struct CommandRouter {
    commands: Vec<&'static str>,
}

impl Default for CommandRouter {
    fn default() -> Self {
        Self {
            commands: TOGGLE_COMMANDS.to_vec(),
        }
    }
}

impl CommandRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handles(&self, command: &str) -> bool {
        command
            .split_whitespace()
            .next()
            .is_some_and(|word| self.commands.iter().any(|c| c.eq_ignore_ascii_case(word)))
    }

    pub fn route(&self, command: &str, presenter: &mut Presenter) -> CommandOutcome {
        if !self.handles(command) {
            debug!(command, "command not handled");
            return CommandOutcome::NotHandled;
        }
        let open = presenter.toggle();
        debug!(command, open, "result window toggled");
        CommandOutcome::Toggled { open }
    }
}
