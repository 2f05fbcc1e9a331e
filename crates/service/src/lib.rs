pub mod auth;
pub mod catalog;
pub mod complaints;
pub mod errors;
pub mod notify;
pub mod offerings;
pub mod orders;
pub mod pagination;
pub mod users;

#[cfg(test)]
mod test_support;
