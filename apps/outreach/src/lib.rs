//! Résumé-driven outreach email generation and dispatch.
//!
//! - `workflow`: the two-step controller a client drives (collect → generate → review → send).
//! - `backend`: the collaborator contract the controller calls, plus its HTTP client.
//! - `routes` and friends: the API server that implements that contract.

pub mod backend;
pub mod config;
pub mod errors;
pub mod generation;
pub mod llm_client;
pub mod mail;
pub mod routes;
pub mod state;
pub mod workflow;
