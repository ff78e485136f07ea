//! # Company Search
//!
//! Converts a company-directory CSV export into a JSON file and serves a
//! case-insensitive company-name search over it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌───────────┐   ┌─────────────┐   ┌──────────┐
//! │ Alruqee.csv │──▶│  convert  │──▶│  data.json  │──▶│  server  │──▶ GET /api/search
//! └─────────────┘   └───────────┘   └─────────────┘   └──────────┘
//! ```
//!
//! The conversion runs once, offline. The server loads the JSON file at
//! startup into a read-only [`dataset::Dataset`] and answers every request
//! from memory.
//!
//! ## Quick Start
//!
//! ```bash
//! company-search convert              # Alruqee.csv -> data.json
//! company-search search "acme"        # same filter, from the terminal
//! PORT=8080 company-search serve      # start HTTP server
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing, defaults, `PORT` override |
//! | [`models`] | `Record`: one CSV row with its company-name match key |
//! | [`convert`] | CSV → JSON conversion |
//! | [`dataset`] | Loading the JSON file into memory |
//! | [`search`] | Substring filter with result cap |
//! | [`server`] | Axum HTTP service |
//! | [`stats`] | Dataset summary |

pub mod config;
pub mod convert;
pub mod dataset;
pub mod models;
pub mod search;
pub mod server;
pub mod stats;
