//! Display framework for CLI output formatting.
//!
//! Renders profiles, detail sections, history and suggestion lists for the
//! terminal. Styling goes through `console`, which honors `NO_COLOR` and
//! drops colors when stdout is not a terminal.

pub mod profile;
pub mod table;

pub use profile::{render_profile, render_section};
pub use table::{list_table, render_history, render_rank_table, render_suggestions};
