//! Integration tests for textimg.

mod helpers;

mod cli_test;
mod render_test;
