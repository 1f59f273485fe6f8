// Utilities module
//
// This module contains startup helpers:
// - logging: Logger initialization
// - prompt: Passphrase entry

pub mod logging;
pub mod prompt;
