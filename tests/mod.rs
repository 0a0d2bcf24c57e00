mod support;

mod cache_tests;
mod cache_writer_tests;
