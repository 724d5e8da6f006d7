pub mod mentorship_group;
pub mod user;
