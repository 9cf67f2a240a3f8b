#![deny(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod frontmatter;
pub mod markdown_ast;
pub mod note;
pub mod noteref;
pub mod publish;
pub mod vault;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub fn doctor_stub() -> String {
    format!("notepub-core v{} on {}", version(), std::env::consts::OS)
}
