pub mod data_provider;
pub mod resume_generator;
