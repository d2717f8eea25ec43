// Data source module root
pub mod client;

pub use client::SessionApiClient;
