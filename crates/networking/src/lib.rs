//! HTTP layer for the portfolio backend API

pub mod http;

pub use http::client::PortfolioClient;
