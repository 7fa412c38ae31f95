use rust_embed::RustEmbed;
use std::borrow::Cow;

/// Read-only mapping from a logical resource name to raw bytes.
///
/// The image store and the data loader only see this trait, so tests can
/// substitute an in-memory bundle for the embedded one.
pub trait ResourceBundle {
    fn bytes(&self, file: &str) -> Option<Cow<'static, [u8]>>;
}

/// Resources shipped inside the binary: one PNG per landmark image name
/// plus `landmarkData.json`.
#[derive(RustEmbed)]
#[folder = "assets/"]
pub struct AppBundle;

impl ResourceBundle for AppBundle {
    fn bytes(&self, file: &str) -> Option<Cow<'static, [u8]>> {
        Self::get(file).map(|asset| asset.data)
    }
}
