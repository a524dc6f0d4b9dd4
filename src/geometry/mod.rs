pub mod boolean_ops;
