//! The slicing pipeline: scan, render, diff, encode, lay out.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::detect;
use crate::error::{Error, Result};
use crate::layout::Layout;
use crate::model::{ObjectEntry, Placement};
use crate::png;
use crate::render::{diff_layers, document_size, downsample, isolate_markup, Rasterizer};
use crate::scanner::scan_titles;

/// Options for slicing a document.
#[derive(Debug, Clone)]
pub struct SliceOptions {
    /// Render canvas width; defaults to the document's intrinsic width.
    pub width: Option<u32>,

    /// Render canvas height; defaults to the document's intrinsic height.
    pub height: Option<u32>,

    /// Integer downsample ratio. The canvas must divide evenly by it.
    pub ratio: u32,

    /// Name of the background layer (element name and file stem).
    pub background_name: String,

    /// View name written into the layout file.
    pub view_name: String,

    /// File name of the layout descriptor.
    pub layout_file: String,

    /// Whether to write the layout descriptor.
    pub write_layout: bool,

    /// Whether to also write a JSON manifest of the placements.
    pub write_manifest: bool,

    /// File name of the JSON manifest.
    pub manifest_file: String,
}

impl SliceOptions {
    /// Create new slice options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the render canvas size explicitly.
    pub fn with_canvas(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Set the downsample ratio.
    pub fn with_ratio(mut self, ratio: u32) -> Self {
        self.ratio = ratio;
        self
    }

    /// Set the background layer name.
    pub fn with_background_name(mut self, name: impl Into<String>) -> Self {
        self.background_name = name.into();
        self
    }

    /// Set the view name used in the layout file.
    pub fn with_view_name(mut self, name: impl Into<String>) -> Self {
        self.view_name = name.into();
        self
    }

    /// Set the layout descriptor file name.
    pub fn with_layout_file(mut self, name: impl Into<String>) -> Self {
        self.layout_file = name.into();
        self
    }

    /// Enable or disable writing the layout descriptor.
    pub fn with_layout(mut self, write: bool) -> Self {
        self.write_layout = write;
        self
    }

    /// Enable or disable writing the JSON manifest.
    pub fn with_manifest(mut self, write: bool) -> Self {
        self.write_manifest = write;
        self
    }
}

impl Default for SliceOptions {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            ratio: 1,
            background_name: "bg".to_string(),
            view_name: "lcd".to_string(),
            layout_file: "default.lay".to_string(),
            write_layout: true,
            write_manifest: false,
            manifest_file: "layout.json".to_string(),
        }
    }
}

/// Progress events reported while a slice run executes.
#[derive(Debug, Clone, Copy)]
pub enum Progress<'a> {
    /// The scan finished; `unique` objects will be rendered.
    Scanned {
        /// Total number of titled subtrees found.
        found: usize,
        /// Number of unique names that will become layers.
        unique: usize,
    },
    /// The background layer was rendered and written.
    BackgroundDone,
    /// One object layer was rendered and written.
    ObjectDone {
        /// Object name.
        name: &'a str,
        /// Zero-based index in discovery order.
        index: usize,
        /// Total unique objects.
        total: usize,
    },
}

/// Result of a completed slice run.
#[derive(Debug, Clone)]
pub struct SliceResult {
    /// Downsampled canvas width.
    pub width: u32,

    /// Downsampled canvas height.
    pub height: u32,

    /// Path of the background image.
    pub background_file: PathBuf,

    /// Path of the layout descriptor, when written.
    pub layout_file: Option<PathBuf>,

    /// Path of the JSON manifest, when written.
    pub manifest_file: Option<PathBuf>,

    /// Every scanned entry, with bounding boxes populated on the first
    /// occurrence of each name.
    pub objects: Vec<ObjectEntry>,

    /// One placement per unique object name, in discovery order.
    pub placements: Vec<Placement>,
}

/// Drives a full slice run over one source document.
///
/// The pipeline owns the document bytes and the retained background buffer;
/// there is no ambient state. Every failure is fatal for the run.
pub struct Pipeline {
    svg: Vec<u8>,
    options: SliceOptions,
}

impl Pipeline {
    /// Create a pipeline over in-memory document bytes.
    pub fn new(svg: Vec<u8>, options: SliceOptions) -> Result<Self> {
        detect::detect_format_from_bytes(&svg)?;
        Ok(Self { svg, options })
    }

    /// Create a pipeline by reading the document from `path`.
    pub fn from_file<P: AsRef<Path>>(path: P, options: SliceOptions) -> Result<Self> {
        let path = path.as_ref();
        let svg = fs::read(path).map_err(|source| Error::Input {
            path: path.to_path_buf(),
            source,
        })?;
        Self::new(svg, options)
    }

    /// Run the pipeline, writing all output files into `out_dir`.
    pub fn run<P: AsRef<Path>>(&self, out_dir: P) -> Result<SliceResult> {
        self.run_with_progress(out_dir, |_| {})
    }

    /// Run the pipeline, reporting progress through `progress`.
    pub fn run_with_progress<P, F>(&self, out_dir: P, mut progress: F) -> Result<SliceResult>
    where
        P: AsRef<Path>,
        F: FnMut(Progress<'_>),
    {
        let out_dir = out_dir.as_ref();
        let options = &self.options;

        if options.ratio == 0 {
            return Err(Error::Other("downsample ratio must be at least 1".to_string()));
        }

        let mut objects = scan_titles(&self.svg);

        // First occurrence of each distinct name becomes a layer.
        let mut seen = HashSet::new();
        let firsts: Vec<usize> = (0..objects.len())
            .filter(|&i| seen.insert(objects[i].name.clone()))
            .collect();
        progress(Progress::Scanned {
            found: objects.len(),
            unique: firsts.len(),
        });

        let (width, height) = self.canvas_size()?;
        if width % options.ratio != 0 || height % options.ratio != 0 {
            return Err(Error::RatioMismatch {
                width,
                height,
                ratio: options.ratio,
            });
        }
        let out_w = width / options.ratio;
        let out_h = height / options.ratio;
        log::info!(
            "slicing {}x{} canvas into {}x{} layers ({} titled subtrees, {} unique)",
            width,
            height,
            out_w,
            out_h,
            objects.len(),
            firsts.len()
        );

        fs::create_dir_all(out_dir).map_err(|source| Error::Output {
            path: out_dir.to_path_buf(),
            source,
        })?;

        let mut rasterizer = Rasterizer::new(width, height)?;

        // Background pass: everything titled stripped, retained as the
        // baseline for every object diff.
        let markup = isolate_markup(&self.svg, &objects, "");
        let full = rasterizer.render(&markup)?;
        let background = downsample(&full, options.ratio)?;
        let background_file = out_dir.join(format!("{}.png", options.background_name));
        png::write_file(&background_file, &background)?;
        progress(Progress::BackgroundDone);

        let mut placements = Vec::with_capacity(firsts.len());
        for (index, &obj) in firsts.iter().enumerate() {
            let name = objects[obj].name.clone();

            let markup = isolate_markup(&self.svg, &objects, &name);
            let full = rasterizer.render(&markup)?;
            let layer = downsample(&full, options.ratio)?;
            let diff = diff_layers(&layer, &background)?;

            let Some(bbox) = diff.bbox else {
                return Err(Error::ObjectNotVisible(name));
            };

            let file = out_dir.join(format!("{}.png", name));
            png::write_file(&file, &diff.image)?;

            log::debug!("{:4} {:4}: {}", bbox.x0, bbox.y0, name);
            objects[obj].bbox = Some(bbox);
            placements.push(Placement {
                name,
                x: bbox.x0,
                y: bbox.y0,
                width: bbox.width(),
                height: bbox.height(),
            });
            progress(Progress::ObjectDone {
                name: &objects[obj].name,
                index,
                total: firsts.len(),
            });
        }

        let layout = Layout {
            width: out_w,
            height: out_h,
            background: options.background_name.clone(),
            view: options.view_name.clone(),
            placements: placements.clone(),
        };
        let layout_file = if options.write_layout {
            let path = out_dir.join(&options.layout_file);
            layout.write_xml(&path)?;
            Some(path)
        } else {
            None
        };
        let manifest_file = if options.write_manifest {
            let path = out_dir.join(&options.manifest_file);
            layout.write_json(&path)?;
            Some(path)
        } else {
            None
        };

        Ok(SliceResult {
            width: out_w,
            height: out_h,
            background_file,
            layout_file,
            manifest_file,
            objects,
            placements,
        })
    }

    /// Canvas size from the options, falling back to the document's
    /// intrinsic size.
    fn canvas_size(&self) -> Result<(u32, u32)> {
        match (self.options.width, self.options.height) {
            (Some(w), Some(h)) => Ok((w, h)),
            (w, h) => {
                let (doc_w, doc_h) = document_size(&self.svg)?;
                Ok((w.unwrap_or(doc_w), h.unwrap_or(doc_h)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_options_builder() {
        let options = SliceOptions::new()
            .with_canvas(640, 480)
            .with_ratio(4)
            .with_background_name("base")
            .with_view_name("panel")
            .with_layout(false)
            .with_manifest(true);

        assert_eq!(options.width, Some(640));
        assert_eq!(options.height, Some(480));
        assert_eq!(options.ratio, 4);
        assert_eq!(options.background_name, "base");
        assert_eq!(options.view_name, "panel");
        assert!(!options.write_layout);
        assert!(options.write_manifest);
    }

    #[test]
    fn test_default_options() {
        let options = SliceOptions::default();
        assert_eq!(options.ratio, 1);
        assert!(options.width.is_none());
        assert_eq!(options.background_name, "bg");
        assert_eq!(options.layout_file, "default.lay");
        assert!(options.write_layout);
        assert!(!options.write_manifest);
    }

    #[test]
    fn test_pipeline_rejects_non_svg() {
        let result = Pipeline::new(b"not markup".to_vec(), SliceOptions::default());
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_missing_input_reports_path() {
        let result = Pipeline::from_file("/does/not/exist.svg", SliceOptions::default());
        match result {
            Err(Error::Input { path, .. }) => {
                assert!(path.to_str().unwrap().contains("exist.svg"));
            }
            _ => panic!("expected input error"),
        }
    }
}
