#![doc = include_str!("../readme.md")]
//
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::collapsible_if)]

pub mod event {
    //!
    //! Event-handler traits and Keybindings.
    //!
    //! See [rat-event](https://docs.rs/rat-event/latest/rat_event/)
    //!
    pub use rat_event::*;

    pub use crate::slider::event::CompareOutcome;
}

/// Module for focus-handling functionality.
/// See [rat-focus](https://docs.rs/rat-focus)
pub mod focus {
    pub use rat_focus::{Focus, FocusBuilder, FocusFlag, HasFocus};
}

/// Trait for relocatable widgets.
/// See also [rat-reloc](https://docs.rs/rat-reloc/latest/rat_reloc/)
pub mod reloc {
    pub use rat_reloc::{relocate_area, RelocatableState};
}

pub mod compare;
pub mod css;
pub mod drag;
pub mod engine;
pub mod geometry;
pub mod handle;
pub mod resize;
pub mod slider;
pub mod util;

mod _private {
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct NonExhaustive;
}
