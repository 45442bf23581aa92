use crate::surface::RasterSurface;
use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};

/// Keeps a GPU texture in sync with a [`RasterSurface`].
///
/// The surface is only re-uploaded when its revision changed since the last
/// upload.
#[derive(Default)]
pub struct TextureManager {
    handle: Option<TextureHandle>,
    uploaded_revision: Option<u64>,
    uploads: u64,
}

impl std::fmt::Debug for TextureManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextureManager")
            .field("has_texture", &self.handle.is_some())
            .field("uploaded_revision", &self.uploaded_revision)
            .field("uploads", &self.uploads)
            .finish()
    }
}

impl TextureManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texture showing the current surface contents.
    pub fn texture_id(&mut self, ctx: &Context, surface: &RasterSurface) -> TextureId {
        let image = match self.handle {
            Some(_) if self.uploaded_revision == Some(surface.revision()) => None,
            _ => Some(ColorImage::from_rgba_unmultiplied(surface.size(), surface.pixels())),
        };

        if let Some(image) = image {
            match &mut self.handle {
                Some(handle) => handle.set(image, TextureOptions::NEAREST),
                None => {
                    self.handle = Some(ctx.load_texture("raster_surface", image, TextureOptions::NEAREST));
                }
            }
            self.uploaded_revision = Some(surface.revision());
            self.uploads += 1;
            log::trace!("Uploaded surface revision {}", surface.revision());
        }

        match &self.handle {
            Some(handle) => handle.id(),
            None => TextureId::default(),
        }
    }

    /// Forces the next call to re-upload.
    pub fn invalidate(&mut self) {
        self.uploaded_revision = None;
    }

    /// Number of uploads performed so far.
    pub fn upload_count(&self) -> u64 {
        self.uploads
    }
}
