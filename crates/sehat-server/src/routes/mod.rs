pub mod health;
pub mod patients;
pub mod screenings;
pub mod trends;
