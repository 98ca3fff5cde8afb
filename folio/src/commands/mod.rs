pub mod contact;
pub mod relay;
