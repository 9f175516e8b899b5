pub mod schema;
pub mod value;
pub mod value_path;
