use render_api::TargetError;

#[derive(Debug, thiserror::Error)]
pub enum PenumbraError {
    #[error("invalid penumbra config: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Target(#[from] TargetError),
    #[error("penumbra pass produced more than {vertices} vertices; u32 indices cannot address them")]
    IndexOverflow { vertices: usize },
}
