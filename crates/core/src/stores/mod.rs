pub mod blob;
pub mod search;

pub use blob::BlobHttpStore;
pub use search::SearchServiceClient;
