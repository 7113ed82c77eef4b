pub mod binder;
pub mod config;
pub mod goal;
pub mod msg;
pub mod node;
pub mod solver;

// Re-export the main entry point for convenient access
pub use node::Node;
