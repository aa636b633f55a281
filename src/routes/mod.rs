pub mod moods;
pub mod pages;
pub mod payload;
pub mod recipe_books;
pub mod recipes;
