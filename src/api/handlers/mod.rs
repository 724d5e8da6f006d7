pub mod health;
pub mod mentorship;
pub mod user;
