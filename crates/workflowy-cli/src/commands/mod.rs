pub mod login;
pub mod mutate;
pub mod read;
mod session;
