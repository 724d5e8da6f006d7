pub mod factory;
pub mod id_generator;
pub mod repositories;
