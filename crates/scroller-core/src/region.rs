//! Named scroll destinations with cached document coordinates
//!
//! Elements are resolved once per name and kept for the lifetime of the cache.
//! Coordinates are filled lazily and recomputed for every region after the
//! viewport is reported resized.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::host::Document;
use crate::{Error, Result};

/// Absolute document-relative vertical position of a region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub top: f64,
    pub bottom: f64,
    /// `top` clamped to the maximum reachable scroll offset
    pub corrected: f64,
}

/// Cache entry for one region name
#[derive(Debug, Clone)]
pub struct Region<E> {
    element: Option<E>,
    coordinate: Option<Coordinate>,
}

impl<E> Region<E> {
    /// Resolved element, `None` when the lookup found nothing
    pub fn element(&self) -> Option<&E> {
        self.element.as_ref()
    }

    /// Last computed coordinate
    pub fn coordinate(&self) -> Option<&Coordinate> {
        self.coordinate.as_ref()
    }

    pub fn is_resolved(&self) -> bool {
        self.element.is_some()
    }
}

/// Selector matching the element that carries `attribute` with value `name`
pub fn area_selector(attribute: &str, name: &str) -> String {
    format!("[{}='{}']", attribute, name)
}

#[derive(Debug)]
pub struct RegionCache<E> {
    attribute_area: String,
    regions: HashMap<String, Region<E>>,
    resized: bool,
}

impl<E> RegionCache<E> {
    pub fn new(attribute_area: impl Into<String>) -> Self {
        Self {
            attribute_area: attribute_area.into(),
            regions: HashMap::new(),
            resized: false,
        }
    }

    /// Look up region `name`, resolving its element on first use.
    ///
    /// A failed lookup is cached too: the entry stays unresolved and
    /// coordinate computation reports `RegionNotFound` for it.
    pub fn resolve<D>(&mut self, name: &str, doc: &D) -> &Region<E>
    where
        D: Document<Element = E>,
    {
        if !self.regions.contains_key(name) {
            let selector = area_selector(&self.attribute_area, name);
            let element = doc.resolve_element(&selector);
            debug!(
                region = name,
                selector = %selector,
                found = element.is_some(),
                "Resolved region element"
            );
            self.regions.insert(
                name.to_string(),
                Region {
                    element,
                    coordinate: None,
                },
            );
        }
        &self.regions[name]
    }

    /// Make sure region `name` has an up-to-date coordinate.
    ///
    /// - resized: every known region is recomputed and the flag is cleared
    /// - no coordinate yet: only `name` is computed
    /// - otherwise the cached coordinate is kept
    pub fn ensure_coordinate<D>(&mut self, name: &str, doc: &D) -> Result<()>
    where
        D: Document<Element = E>,
    {
        let cached = match self.regions.get(name) {
            Some(region) => region.coordinate.is_some(),
            None => return Err(Error::UnknownRegion(name.to_string())),
        };

        if self.resized {
            self.compute_all(doc);
            self.resized = false;
            match self.regions[name].coordinate {
                Some(_) => Ok(()),
                None => Err(Error::RegionNotFound(name.to_string())),
            }
        } else if !cached {
            self.compute_coordinate(name, doc)
        } else {
            trace!(region = name, "Using cached coordinate");
            Ok(())
        }
    }

    /// Corrected coordinate of `name`. Requires a prior successful `ensure_coordinate`.
    pub fn get_coordinate(&self, name: &str) -> Result<f64> {
        self.regions
            .get(name)
            .and_then(|region| region.coordinate)
            .map(|coordinate| coordinate.corrected)
            .ok_or_else(|| Error::MissingCoordinate(name.to_string()))
    }

    /// Mark every cached coordinate as potentially stale
    pub fn notify_resized(&mut self) {
        self.set_resized(true);
    }

    pub fn set_resized(&mut self, resized: bool) {
        self.resized = resized;
    }

    #[inline]
    pub fn is_resized(&self) -> bool {
        self.resized
    }

    pub fn region(&self, name: &str) -> Option<&Region<E>> {
        self.regions.get(name)
    }

    /// Names of all known regions, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.regions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub(crate) fn compute_coordinate<D>(&mut self, name: &str, doc: &D) -> Result<()>
    where
        D: Document<Element = E>,
    {
        let region = self
            .regions
            .get_mut(name)
            .ok_or_else(|| Error::UnknownRegion(name.to_string()))?;
        let element = region
            .element
            .as_ref()
            .ok_or_else(|| Error::RegionNotFound(name.to_string()))?;

        let coordinate = measure(doc, element);
        debug!(
            region = name,
            top = coordinate.top,
            corrected = coordinate.corrected,
            "Computed region coordinate"
        );
        region.coordinate = Some(coordinate);
        Ok(())
    }

    fn compute_all<D>(&mut self, doc: &D)
    where
        D: Document<Element = E>,
    {
        debug!(regions = self.regions.len(), "Viewport resized, recomputing all regions");
        for (name, region) in self.regions.iter_mut() {
            match region.element.as_ref() {
                Some(element) => region.coordinate = Some(measure(doc, element)),
                None => trace!(region = %name, "Skipping unresolved region"),
            }
        }
    }
}

fn measure<D: Document>(doc: &D, element: &D::Element) -> Coordinate {
    let rect = doc.bounding_rect(element);
    let scroll = doc.scroll_offset().y;
    let top = rect.top + scroll;

    Coordinate {
        top,
        bottom: rect.bottom + scroll,
        corrected: clamp(doc, top),
    }
}

/// Largest offset the document can be scrolled to
pub(crate) fn max_scroll_offset<D: Document>(doc: &D) -> f64 {
    let height = doc
        .document_height_candidates()
        .into_iter()
        .fold(0.0, f64::max);
    height - doc.viewport_height()
}

/// Limit `value` so the document is never scrolled past its bottom
pub(crate) fn clamp<D: Document>(doc: &D, value: f64) -> f64 {
    value.min(max_scroll_offset(doc))
}
