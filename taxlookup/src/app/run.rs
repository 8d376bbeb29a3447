use super::AppError;
use crate::config::{AppConfig, DatasetConfig};
use std::sync::Arc;
use taxlookup_core::{
    index::DistrictIndex,
    source::DatasetError,
    validate::Validator,
};

/// reads the district dataset and builds its spatial index on a blocking
/// thread. this happens once, before the server accepts requests.
pub async fn load_index(dataset: &DatasetConfig) -> Result<Arc<DistrictIndex>, AppError> {
    let dataset = dataset.clone();
    let start = std::time::Instant::now();
    let index = tokio::task::spawn_blocking(move || -> Result<DistrictIndex, DatasetError> {
        let source = dataset.source()?;
        let districts = source.build(dataset.assumed_crs, &dataset.fields)?;
        DistrictIndex::new(districts)
    })
    .await
    .map_err(|e| AppError::TaskError(e.to_string()))??;
    log::info!(
        "indexed {} tax districts in {:.2}s",
        index.len(),
        start.elapsed().as_secs_f64()
    );
    Ok(Arc::new(index))
}

/// loads the dataset and pairs it with the configured geocoder.
pub async fn build_validator(config: &AppConfig) -> Result<Arc<Validator>, AppError> {
    let geocoder = config.geocoder.build()?;
    let index = load_index(&config.dataset).await?;
    let validator = Validator::new(Arc::new(geocoder), index, config.dataset.tolerance_deg);
    Ok(Arc::new(validator))
}
