pub mod layout;
pub(crate) mod model;
