use thiserror::Error;

#[derive(Error, Debug)]
pub enum AptError {
    #[error("{0} not found in PATH, is this a Debian-based system?")]
    ToolMissing(&'static str),

    #[error("`{command}` failed: {message}")]
    CommandFailed { command: String, message: String },

    #[error("unexpected `{command}` output: {message}")]
    MalformedOutput { command: String, message: String },

    #[error("package {0} has no candidate version")]
    NoCandidate(String),
}
