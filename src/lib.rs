//! Elasticsearch cluster tools for a tool-plugin host.
//!
//! Credentials arrive as two JSON text fields: `cluster_info` maps cluster
//! names to addresses and `auth_list` maps cluster names to
//! `username:password`. A cluster without an auth entry is called
//! anonymously.
pub mod api;
pub mod cli;
pub mod credentials;
pub mod elasticsearch;
pub mod error;
pub mod logging;
pub mod provider;
pub mod settings;
pub mod tool;
