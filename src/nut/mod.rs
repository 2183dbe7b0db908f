//! NUT (Network UPS Tools) protocol handling.
//!
//! Just enough of the upsd text protocol to stand in for a real server in
//! tests: `VER`, `LIST UPS`, `LIST VAR <ups>` and `LOGOUT`. Everything else is
//! answered with `ERR Unknown command`.
//!
//! # Architecture
//!
//! - **`reader`**: Turns raw bytes into normalized request lines under a size limit
//! - **`request`**: Classifies a line into a [`request::Command`]
//! - **`response`**: The fixed payloads, built once from the config
//! - **`dispatcher`**: Writes the payload for one line back to the client
//! - **`connection`**: Drives reader and dispatcher for one client
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌────────────────┐
//!        │  AwaitingLine  │ ← Read until a full line is buffered
//!        └───────┬────────┘
//!                │ Line received
//!                ▼
//!        ┌────────────────┐
//!        │  Dispatching   │ ← Write the canned response
//!        └───────┬────────┘
//!                │ Response sent → AwaitingLine
//!                │
//!                └─ End of stream / oversized line / I/O error → Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use mock_upsd::config::Config;
//! use mock_upsd::server::Server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let server = Server::bind(&Config::default()).await?;
//!     server.run(std::future::pending()).await
//! }
//! ```

pub mod connection;
pub mod dispatcher;
pub mod reader;
pub mod request;
pub mod response;
