//! Reusable widget components.

pub mod detail;
pub mod menu;
pub mod search;
pub mod tags;

pub use detail::DetailPanel;
pub use menu::MenuPopup;
pub use search::SearchBar;
pub use tags::TagBar;
