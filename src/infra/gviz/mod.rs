mod client;

pub use client::GvizClient;
