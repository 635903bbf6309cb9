pub mod error;
pub mod history;
pub mod orchestrator;
pub mod settings;
pub mod storage;

#[cfg(test)]
mod tests;
