/// API route modules
pub mod counterparties;
pub mod health;
pub mod transfer;
