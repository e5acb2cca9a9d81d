pub mod bindings;
pub mod overlay;
