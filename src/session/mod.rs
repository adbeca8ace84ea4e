/// Session state and synchronous re-rendering.
pub mod state;
