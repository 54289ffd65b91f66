mod catalog_tests;
mod query_tests;
