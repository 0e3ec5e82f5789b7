//! Terminal front-end for the job tracker.
//!
//! [`Dashboard`] holds the page state and talks to any [`api::JobsApi`];
//! [`render`] turns it into text, [`cli`] defines the `jobboard` arguments
//! and [`app`] runs them.

pub mod app;
pub mod cli;
pub mod render;
pub mod view;

pub use view::{CreateOutcome, Dashboard, JobCard};
