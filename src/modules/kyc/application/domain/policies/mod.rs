pub mod document_policy;
