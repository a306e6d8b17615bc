//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod fake_generator;
pub mod library;

pub use fake_generator::{FakeStoryGenerator, FakeStoryGeneratorConfig};
pub use library::{InMemoryLibrary, InMemoryLibraryConfig, LibraryBook};
