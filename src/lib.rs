//! Application form: a multi-step wizard whose later pages depend on
//! earlier answers.

pub mod catalog;
pub mod config;
pub mod error;
pub mod form;
pub mod navigator;
pub mod render;
pub mod routes;
pub mod submission;
pub mod validator;
