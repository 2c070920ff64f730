//! Argument colorizer.
//!
//! # Data Flow
//! ```text
//! call site:
//!     tracing::info!("Loaded {}", lg(&value))   → Styled (type lookup)
//!     tracing::info!("{}", fmt.apply(value))    → Formatted (explicit override)
//!
//! formatter (observability::formatter):
//!     with_color_escapes(true, render message)
//!         → Styled / Formatted consult registry.rs
//!         → format.rs paints the argument
//! ```
//!
//! # Design Decisions
//! - The same call site renders styled for a terminal and plain for a plain
//!   log file; the formatter decides by flipping a thread-local switch
//! - Arguments with no registered style render exactly as their `Display`
//! - The registry is written at setup and read lock-free afterwards

use std::cell::Cell;

pub mod format;
pub mod registry;

pub use format::{Color, Format, Formatted};
pub use registry::{
    install_styles, lg, lg_path, register_style, register_style_matching, style_for,
    StyleRegistry, Styled, StyledPath, TypeInfo,
};

thread_local! {
    static COLOR_ESCAPES: Cell<bool> = const { Cell::new(false) };
}

/// True while the current thread is rendering with color escapes.
pub fn color_escapes_enabled() -> bool {
    COLOR_ESCAPES.with(Cell::get)
}

/// Run `f` with color escapes switched on or off for the current thread.
///
/// The previous setting is restored when `f` returns or unwinds.
pub fn with_color_escapes<R>(enabled: bool, f: impl FnOnce() -> R) -> R {
    struct Restore(bool);

    impl Drop for Restore {
        fn drop(&mut self) {
            COLOR_ESCAPES.with(|flag| flag.set(self.0));
        }
    }

    let _restore = Restore(COLOR_ESCAPES.with(|flag| flag.replace(enabled)));
    f()
}
