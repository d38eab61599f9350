pub mod roles;
pub mod staff;
