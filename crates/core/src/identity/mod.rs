mod resolver;

pub use resolver::{AliasResolver, AliasStore, MemoryAliasStore};
