use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("frame timestamp {got} is older than last processed {last}")]
    TimestampRegression { last: f32, got: f32 },
}
