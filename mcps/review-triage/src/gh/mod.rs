//! gh CLI wrapper module
//!
//! Async functions for executing gh CLI commands and parsing their output,
//! plus [`GhSource`], the collaborator the pipelines pull records from.

pub mod error;
pub mod executor;
pub mod source;

pub use error::{GhError, GhResult};
pub use executor::{
    check_gh_available, execute_gh_api, execute_gh_api_paginated, execute_gh_graphql,
    execute_gh_json, GraphQlVar,
};
pub use source::{GhSource, ReviewSource};
