pub mod exercise;
pub mod lesson;
