pub mod contact;
pub mod form;
