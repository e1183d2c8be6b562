//! Processing pipeline components.

mod coordinator;
mod processor;

pub use coordinator::{
    InputSource, ProcessCheck, collect_inputs, output_dir_for, output_path_for, should_process,
};
pub use processor::{
    ProcessOptions, ProcessResult, open_writer, print_input, process_input, read_session_text,
};
