//! # REST API Module
//!
//! Maps HTTP verbs and paths onto single document-store operations for the
//! `user` and `partnerRequest` collections.
//!
//! | Method | Path | Store call |
//! |--------|------|------------|
//! | GET | `/user` | find |
//! | GET | `/user/top-rated` | find (projected, sorted, limited) |
//! | GET | `/user/{id}` | find_one |
//! | POST | `/user` | insert_one |
//! | GET | `/partner-request?userEmail=` | find |
//! | POST | `/partner-request` | insert_one |
//! | PATCH | `/partner-request/{id}` | find_one_and_update |
//! | DELETE | `/partner-request/{id}` | delete_one |

pub mod document;
pub mod errors;
pub mod parser;
pub mod partner_requests;
pub mod response;
pub mod state;
pub mod users;

pub use errors::{ErrorResponse, RestError, RestResult};
pub use partner_requests::partner_request_routes;
pub use state::{AppState, CollectionNames};
pub use users::user_routes;
