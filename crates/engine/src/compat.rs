use crate::model::{CompatibilityType, ReferenceEntry};

/// Catalog notes phrase marking devices that integrate over RTSP only.
const RTSP_ONLY_PHRASE: &str = "rtsp support only";

/// Derive the integration classification from a catalog entry's notes.
///
/// No entry, or empty notes, defaults to ONVIF-S. The phrase test is
/// case-insensitive.
pub fn compatibility_for(entry: Option<&ReferenceEntry>) -> CompatibilityType {
    match entry {
        Some(e) if e.notes.to_lowercase().contains(RTSP_ONLY_PHRASE) => CompatibilityType::Rtsp,
        _ => CompatibilityType::OnvifS,
    }
}
