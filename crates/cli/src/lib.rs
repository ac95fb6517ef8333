// imgtag CLI library: the staged pipeline driven by the `imgtag` binary.

pub mod exit_codes;
pub mod pipeline;
