pub mod kv;
pub mod local_store;
pub mod seed;

pub use local_store::LocalStore;
