//! studymate - REST backend for study-partner users and partner requests
//!
//! Every route maps onto a single document-store operation over the
//! `user` and `partnerRequest` collections.

pub mod cli;
pub mod credentials;
pub mod http_server;
pub mod observability;
pub mod rest_api;
pub mod store;
