//! Path-addressed access to nested value trees.
//!
//! Form values, touched flags and message maps are all `serde_json::Value`
//! trees addressed by dot-separated field paths such as
//! `personalDetails.dob`. Reads on missing or malformed paths return `None`,
//! writes on malformed paths leave the tree untouched; nothing here panics.

mod flatten;
mod path;
mod value;

pub use flatten::{
    TouchedErrors, first_message, flatten, flatten_messages, touched_errors, unflatten,
};
pub use path::{get, has, join, remove, remove_mut, set, set_mut};
pub use value::{DatePart, DateValue, display_string, is_date_leaf, is_truthy};
