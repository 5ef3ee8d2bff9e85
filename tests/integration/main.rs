//! HTTP-level integration tests.

mod auth_test;
mod helpers;
mod rotation_test;
