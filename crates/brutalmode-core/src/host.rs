// Brutalmode Host Interface
// What the surrounding editor provides to the mode overlay

/// How the editor process was started.
///
/// Headless runs (scripts, build systems) and embedded runs (driven by another
/// program over RPC) have no human at the keyboard, so every gesture-based
/// restriction is lifted for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HostFlags {
    pub headless: bool,
    pub embedded: bool,
}

impl HostFlags {
    /// Flags for a normal interactive session
    pub const INTERACTIVE: HostFlags = HostFlags {
        headless: false,
        embedded: false,
    };

    /// Flags for a headless session
    pub const HEADLESS: HostFlags = HostFlags {
        headless: true,
        embedded: false,
    };

    /// True when no human operator is attached
    pub fn is_non_interactive(self) -> bool {
        self.headless || self.embedded
    }
}

/// Error reported by the host while running an editor command
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("Command '{command}' failed: {reason}")]
    CommandFailed { command: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Editor services the overlay calls into.
///
/// Both calls are opaque side effects; the overlay only decides that they
/// should happen.
pub trait EditorHost {
    /// Run an editor command line, e.g. `set selectmode=key`
    fn run_command(&mut self, command: &str) -> Result<(), HostError>;

    /// Print a message on the editor's console
    fn show_message(&mut self, text: &str);
}
