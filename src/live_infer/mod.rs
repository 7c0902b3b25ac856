pub mod main;
pub mod reference_panel;
pub mod render;
#[cfg(test)]
mod tests;
