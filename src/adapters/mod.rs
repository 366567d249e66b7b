/// Adapters - concrete implementations of the ports
///
/// These modules implement the port traits for specific credential sources and services.
pub mod credentials;
pub mod services;
