//! Integration tests against the full HTTP router.

mod file_test;
mod health_test;
mod helpers;
