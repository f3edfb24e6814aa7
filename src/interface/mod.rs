pub mod element;
pub mod queue;
