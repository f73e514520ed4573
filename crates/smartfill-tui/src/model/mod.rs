pub mod activity;
pub mod form;
pub mod settings;
