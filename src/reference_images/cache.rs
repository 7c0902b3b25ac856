use image::imageops::FilterType;
use image::DynamicImage;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Static example images, one per class, loaded lazily and kept forever.
/// Misses are remembered too, so a class without a picture costs one
/// directory scan.
pub struct ReferenceImages {
    dir: PathBuf,
    max_size: (u32, u32),
    cache: HashMap<String, Option<Arc<DynamicImage>>>,
}

impl ReferenceImages {
    pub fn new(dir: impl Into<PathBuf>, max_size: (u32, u32)) -> Self {
        Self {
            dir: dir.into(),
            max_size,
            cache: HashMap::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn lookup(&mut self, class_name: &str) -> Option<Arc<DynamicImage>> {
        if let Some(cached) = self.cache.get(class_name) {
            return cached.clone();
        }
        let loaded = self.load(class_name).map(Arc::new);
        self.cache.insert(class_name.to_string(), loaded.clone());
        loaded
    }

    fn load(&self, class_name: &str) -> Option<DynamicImage> {
        if !is_plain_name(class_name) {
            return None;
        }
        let path = self.find(class_name)?;
        let image = image::open(path).ok()?;
        let (max_width, max_height) = self.max_size;
        if image.width() > max_width || image.height() > max_height {
            Some(image.resize(max_width, max_height, FilterType::Triangle))
        } else {
            Some(image)
        }
    }

    fn find(&self, class_name: &str) -> Option<PathBuf> {
        let mut matches: Vec<PathBuf> = std::fs::read_dir(&self.dir)
            .ok()?
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| path.file_stem().is_some_and(|stem| stem == class_name))
            .filter(|path| has_image_extension(path))
            .collect();
        matches.sort();

        matches.into_iter().next().or_else(|| {
            let fallback = self.dir.join(format!("{}.png", class_name));
            fallback.is_file().then_some(fallback)
        })
    }
}

fn is_plain_name(class_name: &str) -> bool {
    !class_name.is_empty()
        && class_name != "."
        && class_name != ".."
        && !class_name.contains(['/', '\\'])
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}
