// Adapters layer: concrete implementations of the domain ports.

pub mod lotte;
pub mod telegram;
