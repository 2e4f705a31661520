pub mod attribute;
pub mod decoder;
pub mod errors;
pub mod models;
pub mod registry;
pub mod settings;
pub mod transport;
pub mod uuid;
