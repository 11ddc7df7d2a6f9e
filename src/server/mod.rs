// Server module entry point
// Binds the listener, accepts connections and stops on shutdown signals

pub mod connection;
pub mod listener;
pub mod server_loop;
pub mod signal;

// Re-export commonly used items
pub use listener::create_listener;
pub use server_loop::start_server_loop;
pub use signal::shutdown_signal;
