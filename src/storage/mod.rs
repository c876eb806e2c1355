mod client;

pub use client::StorageClient;
