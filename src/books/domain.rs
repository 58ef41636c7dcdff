pub mod model;

pub const BOOK_NOT_FOUND: &str = "Book with such id not found.";
