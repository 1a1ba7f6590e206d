//! Scope tree: fenced and unfenced regions controlling path visibility.
//!
//! Every path identity in play is registered under some region. A region
//! may reference a path if a registration is reachable by walking up to an
//! ancestor, or by descending from an ancestor through unfenced regions
//! only. Fences (subqueries, aggregates) hide their subtree's
//! registrations from the outside; they never hide the outside from the
//! inside.
//!
//! Resolution uses exact path equality, weak namespace included. Callers
//! that intend the weaker match strip the namespace first.

use crate::PathId;

/// Handle to a region in a [`ScopeTree`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct RegionId(u32);

impl RegionId {
    pub fn as_u32(self) -> u32 {
        self.0
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Scope configuration failures.
///
/// Fatal to the current compilation; the driver attaches source context.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ScopeError {
    /// A path was referenced from a region that cannot see it.
    #[error("invalid scope configuration: path is not visible from its referencing region")]
    InvalidScopeConfiguration { path: PathId, region: RegionId },

    /// A region handle does not belong to this tree.
    #[error("unknown scope region {}", .0.as_u32())]
    UnknownRegion(RegionId),
}

#[derive(Debug, Clone)]
struct Region {
    parent: Option<RegionId>,
    children: Vec<RegionId>,
    fenced: bool,
    paths: Vec<PathId>,
}

/// Tree of scope regions recording where each path identity was
/// introduced.
///
/// The root region is fenced: nothing leaks out of a completed statement.
#[derive(Debug, Clone)]
pub struct ScopeTree {
    regions: Vec<Region>,
}

impl ScopeTree {
    pub fn new() -> Self {
        Self {
            regions: vec![Region {
                parent: None,
                children: Vec::new(),
                fenced: true,
                paths: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> RegionId {
        RegionId(0)
    }

    /// Add a child region under `parent`.
    pub fn new_child(&mut self, parent: RegionId, fenced: bool) -> Result<RegionId, ScopeError> {
        self.check(parent)?;
        let id = RegionId(self.regions.len() as u32);
        self.regions.push(Region {
            parent: Some(parent),
            children: Vec::new(),
            fenced,
            paths: Vec::new(),
        });
        self.regions[parent.index()].children.push(id);
        Ok(id)
    }

    /// Turn a region into a correlation boundary.
    pub fn mark_fenced(&mut self, region: RegionId) -> Result<(), ScopeError> {
        self.check(region)?;
        self.regions[region.index()].fenced = true;
        Ok(())
    }

    pub fn is_fenced(&self, region: RegionId) -> bool {
        self.contains(region) && self.regions[region.index()].fenced
    }

    pub fn parent(&self, region: RegionId) -> Option<RegionId> {
        self.regions.get(region.index()).and_then(|r| r.parent)
    }

    pub fn contains(&self, region: RegionId) -> bool {
        region.index() < self.regions.len()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Record that `path` is introduced under `region`.
    pub fn register(&mut self, region: RegionId, path: PathId) -> Result<(), ScopeError> {
        self.check(region)?;
        let paths = &mut self.regions[region.index()].paths;
        if !paths.contains(&path) {
            paths.push(path);
        }
        Ok(())
    }

    /// Whether `path` may be referenced from `from`.
    pub fn is_visible(&self, from: RegionId, path: &PathId) -> bool {
        self.resolve(from, path).is_ok()
    }

    /// Find the region whose registration makes `path` visible from
    /// `from`.
    ///
    /// Walks up from `from`; at each ancestor, also searches downward
    /// through unfenced regions. Fails with
    /// [`ScopeError::InvalidScopeConfiguration`] when no registration is
    /// reachable.
    pub fn resolve(&self, from: RegionId, path: &PathId) -> Result<RegionId, ScopeError> {
        self.check(from)?;
        let mut cursor = Some(from);
        while let Some(region) = cursor {
            // The starting region's own subtree counts; fenced children
            // below any level do not.
            if let Some(found) = self.search_down(region, path) {
                return Ok(found);
            }
            cursor = self.regions[region.index()].parent;
        }
        Err(ScopeError::InvalidScopeConfiguration {
            path: path.clone(),
            region: from,
        })
    }

    fn search_down(&self, region: RegionId, path: &PathId) -> Option<RegionId> {
        if self.regions[region.index()].paths.contains(path) {
            return Some(region);
        }
        for &child in &self.regions[region.index()].children {
            if self.regions[child.index()].fenced {
                continue;
            }
            if let Some(found) = self.search_down(child, path) {
                return Some(found);
            }
        }
        None
    }

    fn check(&self, region: RegionId) -> Result<(), ScopeError> {
        if self.contains(region) {
            Ok(())
        } else {
            Err(ScopeError::UnknownRegion(region))
        }
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}
