pub mod appwrite;
pub mod error;
pub mod store;

pub use appwrite::AppwriteClient;
pub use error::{is_valid_id, AppwriteError};
pub use store::{DocumentList, DocumentStore, Messaging, Query};
