//! timetrack - a small self-hosted time tracking API
//!
//! A REST API over a single `entries` table: create, list, update and
//! delete time entries, plus per-project aggregate statistics.

pub mod cli;
pub mod http_server;
pub mod store;
pub mod validation;
