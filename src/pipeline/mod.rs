pub mod frame_loop;
pub mod report_writer;
