pub mod group_assignment;
pub mod mentorship_service;
