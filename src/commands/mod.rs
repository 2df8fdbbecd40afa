// Command handlers module
pub mod compare;
pub mod drain;

// Re-exports for cleaner imports
pub use compare::execute as compare;
pub use drain::execute as drain;
