
pub mod content;
pub mod words;
pub mod wikipedia;
pub mod image;
pub mod insult;
pub mod fake_info;
