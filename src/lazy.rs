//! Lazy Image Loading
//!
//! Images are rendered with a deferred source and only receive their real
//! source once they come within `root_margin` pixels of the viewport. After
//! promotion an image is no longer watched. When intersection observation is
//! not available every image is promoted as soon as it is observed.

/// The visible region of the page, in page coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub top: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Whether the environment can report viewport intersections
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intersection {
    /// Load images once they are within `root_margin` pixels of the viewport
    Supported { root_margin: f64 },
    /// No observer available: load everything immediately
    Unsupported,
}

/// An image waiting for its real source
#[derive(Debug, Clone, PartialEq)]
pub struct DeferredImage<K> {
    pub key: K,
    pub src: String,
    pub top: f64,
    pub height: f64,
}

/// Instruction to swap the deferred source of `key` for `src`
#[derive(Debug, Clone, PartialEq)]
pub struct Promotion<K> {
    pub key: K,
    pub src: String,
}

impl<K> From<DeferredImage<K>> for Promotion<K> {
    fn from(image: DeferredImage<K>) -> Self {
        Self {
            key: image.key,
            src: image.src,
        }
    }
}

/// Watches deferred images and decides when each one should load
#[derive(Debug, Clone)]
pub struct LazyImages<K> {
    mode: Intersection,
    watched: Vec<DeferredImage<K>>,
}

impl<K> LazyImages<K> {
    pub fn new(mode: Intersection) -> Self {
        Self {
            mode,
            watched: Vec::new(),
        }
    }

    /// Stops watching everything, e.g. because the grid was re-rendered
    pub fn clear(&mut self) {
        self.watched.clear();
    }

    pub fn pending(&self) -> usize {
        self.watched.len()
    }

    /// Starts watching `image`.
    ///
    /// Without intersection support the image is handed straight back as a
    /// promotion instead of being watched.
    pub fn observe(&mut self, image: DeferredImage<K>) -> Option<Promotion<K>> {
        match self.mode {
            Intersection::Supported { .. } => {
                self.watched.push(image);
                None
            }
            Intersection::Unsupported => Some(image.into()),
        }
    }

    /// Promotes every watched image that now intersects the expanded viewport
    pub fn update(&mut self, viewport: Viewport) -> Vec<Promotion<K>> {
        let margin = match self.mode {
            Intersection::Supported { root_margin } => root_margin,
            Intersection::Unsupported => return Vec::new(),
        };

        let low = viewport.top - margin;
        let high = viewport.bottom() + margin;

        let (hits, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.watched)
            .into_iter()
            .partition(|image| image.top <= high && image.top + image.height >= low);

        self.watched = rest;
        hits.into_iter().map(Promotion::from).collect()
    }
}
