pub mod category;
pub mod complaint;
pub mod db;
pub mod errors;
pub mod order;
pub mod provider_service;
pub mod service;
pub mod service_provider;
pub mod user;

#[cfg(test)]
mod tests;
