pub mod doctor;
pub mod fault;
pub mod sweep;
