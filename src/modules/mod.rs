pub mod admissions;
pub mod attendance;
pub mod auth;
pub mod classes;
pub mod exams;
pub mod materials;
pub mod notices;
pub mod results;
pub mod reviews;
pub mod schedules;
pub mod stats;
pub mod students;
pub mod subjects;
pub mod teachers;
pub mod users;
