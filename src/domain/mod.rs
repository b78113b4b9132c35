// Domain layer - Pure editor types with no I/O
pub mod dashboard;
pub mod drag;
pub mod geometry;
pub mod widget;
