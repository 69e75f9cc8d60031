pub mod client;
pub mod config;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod page;
pub mod server;

pub use client::HttpReconciliationSource;
pub use config::{AppConfig, LoggingConfig, PageConfig, ServerConfig, UpstreamConfig};
pub use observability::init_tracing;
pub use page::ReconciliationPage;
pub use server::{AppState, ReconviewServer, ServerBuilder, build_app, build_router};
