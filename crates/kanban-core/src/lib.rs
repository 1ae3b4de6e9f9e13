pub mod attachment;
pub mod color;
pub mod column;
pub mod error;
pub mod id;
pub mod label;
pub mod project;
pub mod settings;
pub mod task;

pub use attachment::FileAttachment;
pub use column::Column;
pub use error::KanbanError;
pub use label::{Label, Priority, TaskType};
pub use project::Project;
pub use settings::{FontSize, Settings, Theme};
pub use task::{Task, TaskQuery};
