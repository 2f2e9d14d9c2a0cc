pub type WallmarkResult<T> = Result<T, WallmarkError>;

#[derive(thiserror::Error, Debug)]
pub enum WallmarkError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("font not found: {0}")]
    FontNotFound(String),

    #[error("font load error: {0}")]
    FontLoad(String),

    #[error("image error: {0}")]
    Image(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WallmarkError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn font_not_found(msg: impl Into<String>) -> Self {
        Self::FontNotFound(msg.into())
    }

    pub fn font_load(msg: impl Into<String>) -> Self {
        Self::FontLoad(msg.into())
    }

    pub fn image(msg: impl Into<String>) -> Self {
        Self::Image(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            WallmarkError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            WallmarkError::font_not_found("x")
                .to_string()
                .contains("font not found:")
        );
        assert!(
            WallmarkError::font_load("x")
                .to_string()
                .contains("font load error:")
        );
        assert!(
            WallmarkError::image("x")
                .to_string()
                .contains("image error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = WallmarkError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
