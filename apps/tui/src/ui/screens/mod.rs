pub mod courses;
pub mod help;
pub mod loading;
pub mod projects;
