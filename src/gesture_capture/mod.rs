pub mod command;
pub mod main;
pub mod render;
pub mod session;
#[cfg(test)]
mod tests;
