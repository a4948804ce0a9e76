pub mod collection;

pub use collection::ScriptCollectionAdapter;
