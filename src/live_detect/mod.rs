pub mod main;
pub mod render;
#[cfg(test)]
mod tests;
