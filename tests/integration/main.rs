//! Integration tests

mod e2e_test;
mod feed_test;
mod support;
mod ticker_test;
