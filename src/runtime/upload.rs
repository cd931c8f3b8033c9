//! Garment upload: decode, detect landmarks, prepare, publish.
//!
//! Every failure happens before [`GarmentSlot::publish`], so a rejected upload
//! leaves the previously active garment in place.
use super::garment_slot::GarmentSlot;
use super::providers::{GarmentLandmarkProvider, LandmarkResponse};
use crate::diagnostics::{elapsed_ms, TimingBreakdown};
use crate::error::TryOnError;
use crate::garment::{key_black_background, GarmentLandmarkMapper, GarmentProfile, GarmentSource};
use crate::image::io::decode_rgba_image;
use crate::image::Rgba8Image;
use log::{info, warn};
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug)]
pub enum UploadError {
    /// The uploaded bytes are not a decodable image.
    Decode(String),
    /// The landmark provider failed.
    Provider(String),
    /// The decoded garment or its landmarks were rejected.
    Prepare(TryOnError),
}

impl std::fmt::Display for UploadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadError::Decode(msg) => write!(f, "garment upload could not be decoded: {msg}"),
            UploadError::Provider(msg) => write!(f, "garment landmark provider failed: {msg}"),
            UploadError::Prepare(err) => write!(f, "garment upload rejected: {err}"),
        }
    }
}

impl std::error::Error for UploadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UploadError::Prepare(err) => Some(err),
            _ => None,
        }
    }
}

/// Pick the canvas image and run the mapper.
///
/// `Segmented` uses the provider's variant with its black background keyed
/// out. Landmarks are in upload pixel space, so a variant of a different size
/// is ignored in favour of the original.
pub fn prepare_from_response(
    mapper: &GarmentLandmarkMapper,
    source: GarmentSource,
    upload: &Rgba8Image,
    response: &LandmarkResponse,
) -> Result<GarmentProfile, TryOnError> {
    let keyed = match (source, response.segmented.as_ref()) {
        (GarmentSource::Segmented, Some(seg)) if seg.w == upload.w && seg.h == upload.h => {
            Some(key_black_background(seg, mapper.params().key_threshold))
        }
        (GarmentSource::Segmented, Some(seg)) => {
            warn!(
                "segmented garment is {}x{} but upload is {}x{}; using the original",
                seg.w, seg.h, upload.w, upload.h
            );
            None
        }
        _ => None,
    };
    mapper.prepare(keyed.as_ref().unwrap_or(upload), &response.landmarks)
}

/// Turns uploaded bytes into the active garment.
pub struct GarmentUploader<P> {
    provider: P,
    mapper: GarmentLandmarkMapper,
    source: GarmentSource,
}

impl<P: GarmentLandmarkProvider> GarmentUploader<P> {
    pub fn new(provider: P, mapper: GarmentLandmarkMapper, source: GarmentSource) -> Self {
        Self {
            provider,
            mapper,
            source,
        }
    }

    /// Prepare `encoded` and publish it to `slot`.
    pub async fn upload(
        &self,
        encoded: &[u8],
        slot: &GarmentSlot,
    ) -> Result<(Arc<GarmentProfile>, TimingBreakdown), UploadError> {
        let total = Instant::now();
        let mut timings = TimingBreakdown::default();
        let mut clock = Instant::now();

        let upload = decode_rgba_image(encoded).map_err(UploadError::Decode)?;
        timings.lap("decode", &mut clock);

        let response = self.provider.detect(encoded).await.map_err(|e| {
            warn!("{} failed: {e}", self.provider.name());
            UploadError::Provider(e)
        })?;
        timings.lap("landmarks", &mut clock);

        let profile =
            prepare_from_response(&self.mapper, self.source, &upload, &response).map_err(|e| {
                warn!("garment upload rejected: {e}");
                UploadError::Prepare(e)
            })?;
        timings.lap("prepare", &mut clock);

        let published = slot.publish(profile);
        timings.total_ms = elapsed_ms(total);
        info!(
            "garment upload {}x{} ready in {:.1} ms",
            upload.w, upload.h, timings.total_ms
        );
        Ok((published, timings))
    }
}
