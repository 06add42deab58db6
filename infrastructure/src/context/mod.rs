//! Context provider adapters

mod loader;

pub use loader::FileContextProvider;
