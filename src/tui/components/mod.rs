//! # TUI Components
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── search_input.rs  (Username field, emits Changed(text))
//! ├── status_line.rs   (Remaining-quota line + red error line)
//! ├── user_table.rs    (Results table with row selection)
//! └── spinner.rs       (Shown instead of the table while loading)
//! ```
//!
//! Stateless components (`StatusLine`, `ErrorLine`, `Spinner`) receive all
//! data as props. Stateful ones keep their state in `TuiState`: `SearchInput`
//! owns its buffer, `UserTable` borrows `UserTableState` for one frame.

pub mod search_input;
pub mod spinner;
pub mod status_line;
pub mod user_table;

pub use search_input::{SearchInput, SearchInputEvent};
pub use spinner::Spinner;
pub use status_line::{ErrorLine, StatusLine};
pub use user_table::{UserTable, UserTableState};
