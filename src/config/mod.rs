//! Static configuration loaded from files and the environment.

mod r#impl;
mod structs;

pub use structs::*;
