//! State changes requested by view and overlay key handlers.
//!
//! Handlers only see `&TuiState`; they describe cross-cutting changes here
//! and the reducer applies them.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Essays,
    Persona,
    Post { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateMutation {
    Navigate(Route),
    ToggleLanguage,
    CycleTheme,
}
