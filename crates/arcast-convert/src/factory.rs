//! Converter factory.

use crate::external::ExternalConverter;
use crate::scene::SceneConverter;
use crate::traits::{ConversionError, UsdzConverter};
use arcast_core::{Config, ConverterStrategy};
use std::sync::Arc;

/// Create a converter based on configuration
pub fn create_converter(config: &Config) -> Result<Arc<dyn UsdzConverter>, ConversionError> {
    match config.converter_strategy {
        ConverterStrategy::Scene => Ok(Arc::new(SceneConverter::new())),
        ConverterStrategy::External => {
            let tool_path = config.converter_path.clone().ok_or_else(|| {
                ConversionError::Config("CONVERTER_PATH not configured".to_string())
            })?;
            Ok(Arc::new(ExternalConverter::new(
                tool_path,
                config.converter_timeout(),
            )))
        }
    }
}
