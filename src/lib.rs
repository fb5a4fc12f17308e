//! Block-based document model and deterministic HTML layout engine.
//!
//! Projects own documents; a document is a titled, ordered list of typed
//! blocks (text or image), each tagged with an open-vocabulary role that maps
//! to a visual style. [`render::render`] turns a document into a standalone,
//! styled HTML page. Rendering is pure: identical documents always produce
//! identical bytes.
//!
//! Persistence sits behind [`store::Repository`]; [`studio::Studio`] wires a
//! repository to the renderer for callers such as the `torah-layout` CLI.

pub mod block;
pub mod config;
pub mod document;
pub mod render;
pub mod store;
pub mod studio;
pub mod types;
