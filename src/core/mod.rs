pub mod launcher;
pub mod layout;
pub mod normalizer;
pub mod session;
