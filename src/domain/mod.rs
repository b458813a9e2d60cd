pub mod draft;
pub mod enums;
pub mod task;
pub mod views;

pub use draft::{SubtaskRef, TaskDraft};
pub use enums::{Priority, Status, UiMode};
pub use task::{
    CreateSubtaskDto, CreateTaskDto, LinkSubtaskDto, Subtask, SubtaskSuggestion, SuggestionRequest,
    Task, UpdateSubtaskDto, UpdateTaskDto,
};
pub use views::{flatten_tasks, priority_marker, status_badge, tree_connector, FlatRow};
