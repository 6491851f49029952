use papershelf_core::FilterKey;

/// User intents produced by [`crate::input::map_event`] and consumed by
/// [`crate::app::App::update`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    GoTop,
    GoBottom,
    OpenPanel,
    /// Esc: close help, then the panel, then drop the search text.
    NavigateBack,

    StartSearch,
    /// Typed character; `'\x08'` is backspace.
    SearchInput(char),
    SearchConfirm,
    SearchCancel,

    CycleYear,
    CycleDomain,
    CycleVenue,
    CycleMinScore,
    ClearFilter(FilterKey),
    ResetFilters,
    CycleSort,

    NextTab,
    PrevTab,
    ToggleTheme,
    CopyLink,
    ToggleHelp,

    Resize(u16, u16),
    Tick,
    None,
}
