mod lightlevel;

pub use lightlevel::{PERMISSION_RELOAD, lightlevel_command_tree, register_use_permission};
