pub mod canvas;
pub mod span;
pub mod style;
