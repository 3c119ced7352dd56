//! A mouse-driven dropdown/select widget for ratatui terminal UIs.
//!
//! The host owns a [`Document`] that fans pointer-down events out to every
//! mounted [`Dropdown`]. Each dropdown subscribes once on mount and
//! unsubscribes when it is dropped.

pub mod document;
pub mod dropdown;
pub mod event;
pub mod theme;

pub use document::{Document, InstanceId, Subscription};
pub use dropdown::{Dropdown, DropdownOption, DropdownProps, DropdownState, Hit};
pub use event::PointerEvent;
pub use theme::Theme;
