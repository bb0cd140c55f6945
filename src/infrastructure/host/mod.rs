//! Host adapters exposing a real terminal as a [`HostObject`](crate::host::HostObject) tree

pub mod wezterm;

pub use wezterm::{PaneDriver, PaneInfo, WeztermCli, WeztermError, WeztermHost};
