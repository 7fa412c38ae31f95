use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use image::{imageops::FilterType, DynamicImage, RgbaImage};
use tracing::debug;

use crate::bundle::ResourceBundle;
use crate::constants::{DISPLAY_SCALE, ORIGINAL_SIZE};
use crate::error::StoreError;

/// A rendered raster image tagged with the display scale it targets, so
/// consumers draw it at the correct logical size. Cloning shares the pixel
/// buffer.
#[derive(Debug, Clone)]
pub struct Bitmap {
    pixels: Arc<RgbaImage>,
    scale: u32,
    label: String,
}

impl Bitmap {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Rendered pixels per logical point.
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// The logical image name this bitmap was rendered from.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// True when both handles share the same cached pixel buffer.
    pub fn same_pixels(&self, other: &Bitmap) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }
}

/// On-demand image scaling cache.
///
/// Maps an image name to the set of sizes rendered for it so far. The base
/// image is decoded from the bundle on the first request for a name and
/// kept under the canonical size key; every other size is rendered from
/// that base at `size * DISPLAY_SCALE` pixels. Entries are never evicted;
/// they live as long as the store does.
pub struct ImageStore {
    bundle: Box<dyn ResourceBundle + Send + Sync>,
    images: HashMap<String, HashMap<u32, Bitmap>>,
    renders: usize,
}

impl ImageStore {
    pub fn new(bundle: impl ResourceBundle + Send + Sync + 'static) -> Self {
        ImageStore {
            bundle: Box::new(bundle),
            images: HashMap::new(),
            renders: 0,
        }
    }

    /// Return the bitmap for `name` at the requested logical `size`,
    /// rendering and caching it if this size has not been requested before.
    pub fn image(&mut self, name: &str, size: u32) -> Result<Bitmap, StoreError> {
        if size == 0 {
            return Err(StoreError::RenderFailure(name.to_string()));
        }

        self.guarantee_base(name)?;

        if let Some(hit) = self.images.get(name).and_then(|sizes| sizes.get(&size)) {
            debug!(name, size, "image cache hit");
            return Ok(hit.clone());
        }

        let base = self
            .images
            .get(name)
            .and_then(|sizes| sizes.get(&ORIGINAL_SIZE))
            .cloned()
            .ok_or_else(|| StoreError::ResourceNotFound(name.to_string()))?;

        let pixels = size
            .checked_mul(DISPLAY_SCALE)
            .ok_or_else(|| StoreError::RenderFailure(name.to_string()))?;
        let rendered = self.size_image(&base, pixels)?;
        if let Some(sizes) = self.images.get_mut(name) {
            sizes.insert(size, rendered.clone());
        }
        Ok(rendered)
    }

    /// Number of resize operations performed so far. Cache hits do not
    /// change this count.
    pub fn render_count(&self) -> usize {
        self.renders
    }

    /// Logical sizes currently cached for `name`, ascending. Empty when the
    /// name has never been requested.
    pub fn cached_sizes(&self, name: &str) -> Vec<u32> {
        let mut sizes: Vec<u32> = self
            .images
            .get(name)
            .map(|m| m.keys().copied().collect())
            .unwrap_or_default();
        sizes.sort_unstable();
        sizes
    }

    /// Decode the full-resolution source for `name` from the bundle and
    /// store it under the canonical size key, unless already present.
    fn guarantee_base(&mut self, name: &str) -> Result<(), StoreError> {
        if self.images.contains_key(name) {
            return Ok(());
        }

        let file = format!("{name}.png");
        let data = self
            .bundle
            .bytes(&file)
            .ok_or_else(|| StoreError::ResourceNotFound(file.clone()))?;

        let decoded = image::load_from_memory(&data).map_err(|e| StoreError::DecodeFailure {
            name: file,
            reason: e.to_string(),
        })?;

        let base = Bitmap {
            pixels: Arc::new(decoded.to_rgba8()),
            scale: DISPLAY_SCALE,
            label: name.to_string(),
        };
        debug!(name, width = base.width(), "loaded base image from bundle");
        self.images
            .insert(name.to_string(), HashMap::from([(ORIGINAL_SIZE, base)]));
        Ok(())
    }

    fn size_image(&mut self, base: &Bitmap, pixels: u32) -> Result<Bitmap, StoreError> {
        let scaled = DynamicImage::ImageRgba8((*base.pixels).clone())
            .resize_exact(pixels, pixels, FilterType::Triangle)
            .into_rgba8();
        if scaled.width() == 0 || scaled.height() == 0 {
            return Err(StoreError::RenderFailure(base.label.clone()));
        }

        self.renders += 1;
        debug!(name = %base.label, pixels, "rendered image variant");
        Ok(Bitmap {
            pixels: Arc::new(scaled),
            scale: DISPLAY_SCALE,
            label: base.label.clone(),
        })
    }
}

/// Shared handle over the store, in the shape the rest of the crate passes
/// around. The mutex covers the whole read-check-insert sequence, so two
/// threads racing on the same `(name, size)` never render it twice.
#[derive(Clone)]
pub struct SharedImageStore {
    inner: Arc<Mutex<ImageStore>>,
}

impl SharedImageStore {
    pub fn new(bundle: impl ResourceBundle + Send + Sync + 'static) -> Self {
        SharedImageStore {
            inner: Arc::new(Mutex::new(ImageStore::new(bundle))),
        }
    }

    pub fn image(&self, name: &str, size: u32) -> Result<Bitmap, StoreError> {
        self.inner.lock().unwrap().image(name, size)
    }

    pub fn render_count(&self) -> usize {
        self.inner.lock().unwrap().render_count()
    }

    pub fn cached_sizes(&self, name: &str) -> Vec<u32> {
        self.inner.lock().unwrap().cached_sizes(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use std::collections::HashMap;

    struct MapBundle(HashMap<String, Vec<u8>>);

    impl MapBundle {
        fn with_png(name: &str, side: u32) -> Self {
            let mut files = HashMap::new();
            files.insert(format!("{name}.png"), png_bytes(side));
            MapBundle(files)
        }
    }

    impl ResourceBundle for MapBundle {
        fn bytes(&self, file: &str) -> Option<Cow<'static, [u8]>> {
            self.0.get(file).map(|b| Cow::Owned(b.clone()))
        }
    }

    fn png_bytes(side: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(side, side, image::Rgba([10, 120, 80, 255]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(
                &mut std::io::Cursor::new(&mut bytes),
                image::ImageFormat::Png,
            )
            .unwrap();
        bytes
    }

    // Canonical 250-point source at 2x density.
    fn store_with(name: &str) -> ImageStore {
        ImageStore::new(MapBundle::with_png(name, ORIGINAL_SIZE * DISPLAY_SCALE))
    }

    #[test]
    fn first_request_loads_base_and_renders_requested_size() {
        let mut store = store_with("turtlerock");

        let bitmap = store.image("turtlerock", 50).unwrap();

        assert_eq!(bitmap.width(), 100);
        assert_eq!(bitmap.height(), 100);
        assert_eq!(bitmap.scale(), DISPLAY_SCALE);
        assert_eq!(bitmap.label(), "turtlerock");
        assert_eq!(store.render_count(), 1);
        assert_eq!(store.cached_sizes("turtlerock"), vec![50, ORIGINAL_SIZE]);
    }

    #[test]
    fn repeated_request_is_a_hit_with_no_new_render() {
        let mut store = store_with("turtlerock");

        let first = store.image("turtlerock", 50).unwrap();
        let second = store.image("turtlerock", 50).unwrap();

        assert!(first.same_pixels(&second));
        assert_eq!(store.render_count(), 1);
    }

    #[test]
    fn canonical_size_request_reuses_the_base_entry() {
        let mut store = store_with("turtlerock");

        let base = store.image("turtlerock", ORIGINAL_SIZE).unwrap();
        let again = store.image("turtlerock", ORIGINAL_SIZE).unwrap();

        assert!(base.same_pixels(&again));
        assert_eq!(store.render_count(), 0);
        assert_eq!(store.cached_sizes("turtlerock"), vec![ORIGINAL_SIZE]);
    }

    #[test]
    fn distinct_sizes_coexist_without_rerendering() {
        let mut store = store_with("turtlerock");

        let small = store.image("turtlerock", 50).unwrap();
        let full = store.image("turtlerock", 250).unwrap();
        assert_eq!(store.render_count(), 1); // 250 hits the base directly

        let small_again = store.image("turtlerock", 50).unwrap();
        let full_again = store.image("turtlerock", 250).unwrap();

        assert!(small.same_pixels(&small_again));
        assert!(full.same_pixels(&full_again));
        assert_eq!(store.render_count(), 1);
        assert_eq!(store.cached_sizes("turtlerock"), vec![50, 250]);
    }

    #[test]
    fn dimensions_follow_the_display_scale() {
        let mut store = store_with("icybay");

        for size in [1, 40, 75, 130] {
            let bitmap = store.image("icybay", size).unwrap();
            assert_eq!(bitmap.width(), size * DISPLAY_SCALE);
            assert_eq!(bitmap.height(), size * DISPLAY_SCALE);
        }
        assert_eq!(store.render_count(), 4);
    }

    #[test]
    fn unknown_name_is_resource_not_found() {
        let mut store = store_with("turtlerock");

        let err = store.image("nosuchimage", 50).unwrap_err();
        assert!(matches!(err, StoreError::ResourceNotFound(file) if file == "nosuchimage.png"));
        assert!(store.cached_sizes("nosuchimage").is_empty());
    }

    #[test]
    fn undecodable_bytes_are_a_decode_failure() {
        let mut files = HashMap::new();
        files.insert("broken.png".to_string(), b"not a png".to_vec());
        let mut store = ImageStore::new(MapBundle(files));

        let err = store.image("broken", 50).unwrap_err();
        assert!(matches!(err, StoreError::DecodeFailure { .. }));
    }

    #[test]
    fn zero_size_is_a_render_failure() {
        let mut store = store_with("turtlerock");

        let err = store.image("turtlerock", 0).unwrap_err();
        assert!(matches!(err, StoreError::RenderFailure(_)));
        assert_eq!(store.render_count(), 0);
    }

    #[test]
    fn size_overflowing_the_scale_is_a_render_failure() {
        let mut store = store_with("turtlerock");

        let err = store.image("turtlerock", u32::MAX / 2 + 1).unwrap_err();
        assert!(matches!(err, StoreError::RenderFailure(name) if name == "turtlerock"));
        assert_eq!(store.render_count(), 0);
        // The base entry still loaded; only the oversized render failed.
        assert_eq!(store.cached_sizes("turtlerock"), vec![ORIGINAL_SIZE]);
    }

    #[test]
    fn shared_handles_see_one_cache() {
        let store = SharedImageStore::new(MapBundle::with_png("turtlerock", 500));
        let other = store.clone();

        let a = store.image("turtlerock", 50).unwrap();
        let b = other.image("turtlerock", 50).unwrap();

        assert!(a.same_pixels(&b));
        assert_eq!(store.render_count(), 1);
        assert_eq!(other.cached_sizes("turtlerock"), vec![50, ORIGINAL_SIZE]);
    }

    #[test]
    fn racing_threads_render_a_size_once() {
        let store = SharedImageStore::new(MapBundle::with_png("turtlerock", 500));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || store.image("turtlerock", 60).unwrap())
            })
            .collect();

        let bitmaps: Vec<Bitmap> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert!(bitmaps.windows(2).all(|w| w[0].same_pixels(&w[1])));
        assert_eq!(store.render_count(), 1);
    }
}
