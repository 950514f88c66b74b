mod config_tests;
mod server_tests;
