//! HTTP API for the task tracker.
//!
//! ## Endpoints
//!
//! - `GET /tasks/` - List all tasks as a JSON object keyed by id
//! - `POST /tasks/` - Create a new task
//! - `PUT /tasks/` - Replace an existing task (target id taken from the body)
//! - `GET /tasks/{id}` - Get a single task
//! - `DELETE /tasks/{id}` - Delete a task
//!
//! Every response carries `Content-Type: application/json`, error bodies
//! included. Failures other than list-level ones map to `400 Bad Request`.

mod routes;
mod tasks;

pub use routes::{app, serve, AppState};
