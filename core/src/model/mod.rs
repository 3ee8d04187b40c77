pub mod filter;
pub mod task;
pub mod todo_list;
