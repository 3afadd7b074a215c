// Module declarations
pub mod persistence;
mod search;

pub use persistence::InMemoryDocumentRepository;
