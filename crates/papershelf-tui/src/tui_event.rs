use papershelf_core::LoadedSet;

/// Result of the one-shot dataset load, sent from the load task to the TUI.
#[derive(Debug)]
pub enum LoadEvent {
    Loaded(LoadedSet),
    /// Human-readable reason shown in the error banner.
    Failed(String),
}
