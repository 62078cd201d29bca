//! External engine interface: argument assembly and subprocess execution.

mod args;
mod runner;

pub use args::{page_images_args, render_args, rotate_args, split_args, Arg, ArgSpec};
pub use runner::{EngineRunner, RunOutput};
