#![doc = "folio-core: CV rendering and GitHub activity aggregation for folio."]

//! Two independent transformation cores and the collaborators around them:
//!
//! - [`cv`]: renders a [`model::CvData`] record as CSV, plain text, LaTeX or PDF
//! - [`activity`]: derives dashboard statistics from GitHub repos and events
//! - [`contract`] and [`github`]: the fetch seam and its HTTP implementation
//! - [`dashboard`]: joint fetch plus aggregation
//!
//! The CLI crate owns configuration files, environment secrets and file output.

pub mod activity;
pub mod contract;
pub mod cv;
pub mod dashboard;
pub mod github;
pub mod model;
