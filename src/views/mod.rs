//! The console's screens: the landing banner, the login stub, the add form and the list view with
//! its update and delete actions.

pub mod add_student;
pub mod home;
pub mod login;
pub mod view_students;

#[cfg(test)]
pub(crate) mod test_support;
