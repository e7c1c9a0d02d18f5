pub mod file_probe;

pub use file_probe::{FileInfo, FileProbe, ProbeError, ProbeResult, Probed};
