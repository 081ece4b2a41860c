pub mod report_sidecar;
pub mod wave_file;
