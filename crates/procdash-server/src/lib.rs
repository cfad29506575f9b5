//! HTTP server for the procdash dashboard.
//!
//! Serves the server-rendered pages and static assets, runs the route
//! guard in front of every navigation, and proxies `/api/*` to the
//! externally-owned process supervisor backend.

pub mod api;
pub mod assets;
pub mod guard;
pub mod pages;
pub mod server;
pub mod upstream;

pub use server::DashServer;
