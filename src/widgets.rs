pub mod chips;
pub mod popup;
