//! バックエンド通信

mod fetch;

pub use fetch::FetchTransport;
