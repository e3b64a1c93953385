// Adapters layer: concrete implementations of the domain ports (filesystem, git).

pub mod git;
pub mod storage;

pub use git::GitBlame;
pub use storage::LocalStorage;
