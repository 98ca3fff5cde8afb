pub use controller::{ContactFormConfig, ContactFormController, ContactFormSubmitError};

mod controller;
pub mod view;
