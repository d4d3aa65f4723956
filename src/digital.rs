pub mod push_button;
