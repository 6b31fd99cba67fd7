// src/parking.rs
use crate::error::ZurichError;
use crate::models::{DisabledParking, FeatureCollection};

/// Resource path of the disabled parking WFS service.
pub const DISABLED_PARKINGS_PATH: &str = "Behindertenparkplaetze";

/// WFS layer holding the disabled parking spots.
pub const DISABLED_PARKINGS_LAYER: &str = "behindertenparkplaetze_dav_p";

impl crate::ZurichClient {
    /// Lists all disabled parking spots of the City of Zurich.
    ///
    /// Records come back in the order the server sent them. The client does not
    /// deduplicate; group by [`DisabledParking::spot_id`] if uniqueness matters.
    pub async fn disabled_parkings(&self) -> Result<Vec<DisabledParking>, ZurichError> {
        let params = [
            ("service", "WFS"),
            ("request", "GetFeature"),
            ("outputFormat", "GeoJSON"),
            ("typename", DISABLED_PARKINGS_LAYER),
        ];

        let response = self.get(DISABLED_PARKINGS_PATH, Some(&params[..])).await?;
        let collection: FeatureCollection = serde_json::from_value(response)?;

        let spots = collection
            .features
            .iter()
            .map(DisabledParking::from_feature)
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!("Mapped {} disabled parking spots", spots.len());
        Ok(spots)
    }
}
