pub mod auth;
pub mod classes;
pub mod dashboard;
pub mod grades;
pub mod health;
pub mod parents;
pub mod students;
pub mod subjects;
