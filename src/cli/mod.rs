// CLI module
//
// This module contains command-line interface functionality:
// - arguments: Command-line argument parsing and conversion into the runtime configuration

pub mod arguments;

pub use arguments::ProxyArguments;
