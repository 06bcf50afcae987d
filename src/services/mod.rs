use std::sync::Arc;

mod mapping;

pub use mapping::{MappingService, MappingServiceTrait};

use crate::config::ShortcodeConfig;
use crate::repositories::MappingRepositoryTrait;
use crate::utils::shortcode::RandomShortcodeGenerator;

/// The service as wired into the HTTP layer, independent of the storage backend
pub type MappingServiceType = MappingService<dyn MappingRepositoryTrait>;

/// Service Register
pub fn build_mapping_service(
    repository: Arc<dyn MappingRepositoryTrait>,
    config: &ShortcodeConfig,
) -> MappingServiceType {
    let generator = RandomShortcodeGenerator::new(config.length);
    MappingService::new(repository, Arc::new(generator), config.max_attempts)
}
