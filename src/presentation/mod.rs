//! Display lookups and text helpers.
//!
//! Pure functions over static tables; nothing here touches the network.

pub mod era;
pub mod style;
pub mod text;

pub use era::{Era, EraTable};
pub use style::{BlogCategoryLink, BlogCategoryStyle, DisplayStyle, StyleBook};
pub use text::{format_date, sanitize_html, truncate_text};
