pub mod document_store_gcs;

pub use document_store_gcs::GcsDocumentStore;
