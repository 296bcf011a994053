pub mod fastforex;

pub use fastforex::FastForexClient;
