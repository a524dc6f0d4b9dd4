pub mod history_stack;
