use crate::app_config::AppConfig;

/// Which editor the seller is in. The two flows share everything except the
/// minimum image count and how variations reach the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowKind {
    Create,
    Edit,
}

impl std::fmt::Display for FlowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlowKind::Create => write!(f, "create"),
            FlowKind::Edit => write!(f, "edit"),
        }
    }
}

/// Inclusive bounds on the image count of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageBounds {
    pub min: usize,
    pub max: usize,
}

impl ImageBounds {
    #[must_use]
    pub fn contains(&self, count: usize) -> bool {
        (self.min..=self.max).contains(&count)
    }
}

/// Image limits for both flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImagePolicy {
    pub max_images: usize,
    pub max_image_bytes: u64,
    pub create_min_images: usize,
    pub edit_min_images: usize,
}

impl Default for ImagePolicy {
    fn default() -> Self {
        Self {
            max_images: 8,
            max_image_bytes: 5 * 1024 * 1024,
            create_min_images: 2,
            edit_min_images: 1,
        }
    }
}

impl ImagePolicy {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            max_images: config.max_images,
            max_image_bytes: config.max_image_bytes,
            create_min_images: config.create_min_images,
            edit_min_images: config.edit_min_images,
        }
    }

    #[must_use]
    pub fn bounds(&self, flow: FlowKind) -> ImageBounds {
        let min = match flow {
            FlowKind::Create => self.create_min_images,
            FlowKind::Edit => self.edit_min_images,
        };
        ImageBounds {
            min,
            max: self.max_images,
        }
    }
}
