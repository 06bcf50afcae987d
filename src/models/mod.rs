mod mapping;

pub use mapping::{CreateMappingDto, Mapping, MappingResponseDto, UpdateMappingDto};
