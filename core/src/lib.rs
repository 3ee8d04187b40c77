pub mod config;
pub mod error;
pub mod gesture;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;

pub use config::Config;
pub use error::ListError;
pub use gesture::{DragOutcome, DragReorderInterpreter, DragState, DEFAULT_DRAG_THRESHOLD};
pub use input::{parse_args, expand_key, ParsedInput, KNOWN_KEYS};
pub use model::filter::{FilterCriteria, StatusFilter};
pub use model::task::TaskRecord;
pub use model::todo_list::{derive_view, DerivedView, TodoList};
pub use repository::{FileTaskStore, MemoryTaskStore, NewTask, TaskStore};
pub use service::task_service::TaskService;
pub use time::{parse_due_date, parse_due_date_from};
