pub mod columns;
pub mod projects;
pub mod settings;
pub mod tasks;
