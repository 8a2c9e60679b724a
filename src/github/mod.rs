pub mod api;
pub mod credentials;
pub mod fetch;
pub mod walker;

pub use credentials::{Credential, CredentialPool};
pub use fetch::{ApiFetcher, Fetch};
pub use walker::{resolve_files, CommitPageWalker, Page};
