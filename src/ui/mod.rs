pub mod style;
pub mod view;
