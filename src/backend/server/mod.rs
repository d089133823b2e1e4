//! Server Module
//!
//! This module contains the code that builds and tears down the server:
//! configuration, database setup, shared state and app creation.
//!
//! # Architecture
//!
//! - **`config`** - Configuration loading and validation
//! - **`database`** - SQLite pool and migrations
//! - **`state`** - Application state structure and `FromRef` implementations
//! - **`init`** - Server initialization and app creation
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── config.rs       - Configuration (defaults, TOML file, environment)
//! ├── database.rs     - Connection pool and migrations
//! ├── state.rs        - AppState and FromRef implementations
//! └── init.rs         - Server initialization and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `ServerConfig::load` reads file and environment
//! 2. **State Creation**: `AppState::initialize` connects, migrates, builds services
//! 3. **Router Creation**: `create_app` wires routes and layers around the state
//! 4. **Teardown**: `AppState::shutdown` closes the pool after the server drains

/// Server configuration loading
pub mod config;

/// Database connection and migrations
pub mod database;

/// Application state management
pub mod state;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use config::ServerConfig;
pub use init::create_app;
pub use state::AppState;
