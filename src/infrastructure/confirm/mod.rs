//! Confirmation prompt implementations

mod interactive;

pub use interactive::DialoguerConfirm;
