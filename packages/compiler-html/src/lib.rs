//! # MiniSite HTML Compiler
//!
//! Static export of a published page: a [`VisualTree`](minisite_renderer::VisualTree)
//! becomes one self-contained HTML document. Head tags and pixel scripts come
//! from the tree; actions and widgets travel as `data-*` attributes and a JSON
//! script block for the page runtime to pick up.

mod compiler;

pub use compiler::{compile_to_html, CompileError, CompileOptions};

#[cfg(test)]
mod tests;
