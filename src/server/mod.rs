// Server module entry point
// Listener binding, accept loop, connection serving, signal handling

pub mod connection;
pub mod listener;
pub mod signal;

// Rust does not allow `loop` as a module name (keyword), use server_loop
#[path = "loop.rs"]
pub mod server_loop;

// Re-export commonly used functions
pub use listener::bind_with_fallback;
pub use server_loop::run_accept_loop;
