use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Command exited with status {code:?}: {stderr}")]
    Command {
        stdout: String,
        stderr: String,
        code: Option<i32>,
    },
}
