//! Single-writer, many-reader holder for the active garment.
//!
//! A profile is published as one `Arc`, so a reader sees either the previous
//! canvas and quad or the new ones, never a mix.
use crate::garment::GarmentProfile;
use log::info;
use std::sync::Arc;
use tokio::sync::watch;

pub type SharedProfile = Option<Arc<GarmentProfile>>;

#[derive(Debug)]
pub struct GarmentSlot {
    tx: watch::Sender<SharedProfile>,
}

impl Default for GarmentSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl GarmentSlot {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Replace the active garment.
    pub fn publish(&self, profile: GarmentProfile) -> Arc<GarmentProfile> {
        let profile = Arc::new(profile);
        let (cw, ch) = (profile.canvas().w, profile.canvas().h);
        self.tx.send_replace(Some(Arc::clone(&profile)));
        info!("GarmentSlot: published garment (canvas {}x{})", cw, ch);
        profile
    }

    /// Drop the active garment; frames render without overlay afterwards.
    pub fn reset(&self) {
        if self.tx.send_replace(None).is_some() {
            info!("GarmentSlot: garment cleared");
        }
    }

    pub fn current(&self) -> SharedProfile {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> GarmentReader {
        GarmentReader {
            rx: self.tx.subscribe(),
        }
    }
}

/// Read handle held by a frame loop.
#[derive(Clone, Debug)]
pub struct GarmentReader {
    rx: watch::Receiver<SharedProfile>,
}

impl GarmentReader {
    /// The garment to use for one whole frame.
    pub fn snapshot(&self) -> SharedProfile {
        self.rx.borrow().clone()
    }
}
